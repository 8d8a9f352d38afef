// Decimal parsing under a configurable decimal separator. The grouping
// separator is inferred as the complementary character (comma <-> period);
// any other decimal separator disables grouping handling.

use crate::error::{CoreError, Result};

pub fn grouping_separator(decimal_separator: char) -> Option<char> {
    match decimal_separator {
        '.' => Some(','),
        ',' => Some('.'),
        _ => None,
    }
}

pub fn parse_decimal(literal: &str, decimal_separator: char) -> Result<f64> {
    let trimmed = literal.trim();
    let grouping = grouping_separator(decimal_separator);

    let mut normalized = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        if Some(ch) == grouping {
            continue;
        }
        if ch == decimal_separator {
            normalized.push('.');
        } else {
            normalized.push(ch);
        }
    }

    normalized
        .parse::<f64>()
        .map_err(|_| CoreError::NumericParse {
            literal: literal.to_string(),
        })
}

pub fn parse_integer(literal: &str) -> Result<i64> {
    literal
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::NumericParse {
            literal: literal.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_separator_treats_commas_as_grouping() {
        assert_eq!(parse_decimal("1,234.5", '.').unwrap(), 1234.5);
    }

    #[test]
    fn comma_separator_treats_periods_as_grouping() {
        assert_eq!(parse_decimal("1.234,5", ',').unwrap(), 1234.5);
        assert_eq!(parse_decimal("21,4", ',').unwrap(), 21.4);
    }

    #[test]
    fn other_separators_disable_grouping_handling() {
        assert_eq!(parse_decimal("12;5", ';').unwrap(), 12.5);
        assert!(parse_decimal("1,2;5", ';').is_err());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_decimal(" 7.4 ", '.').unwrap(), 7.4);
    }

    #[test]
    fn unparseable_literals_report_the_original_text() {
        assert_eq!(
            parse_decimal("abc", '.'),
            Err(CoreError::NumericParse {
                literal: "abc".to_string()
            })
        );
    }

    #[test]
    fn integers_parse_without_separators() {
        assert_eq!(parse_integer(" 4326 ").unwrap(), 4326);
        assert!(parse_integer("4,326").is_err());
    }
}
