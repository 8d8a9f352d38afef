// Parse-pattern compiler - turns a placeholder pattern into a segment list
// and tokenizes cell values against it.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern contains no field placeholders")]
    NoFields,

    #[error("placeholder '{0}' assigns the same field twice")]
    DuplicateField(String),

    #[error("placeholders '{0}' and '{1}' are adjacent with no separating literal")]
    AdjacentFields(String, String),

    #[error("expected literal '{expected}' at offset {offset}")]
    LiteralMismatch { expected: String, offset: usize },

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<F> {
    Literal(String),
    Field(F),
}

/// A compiled parse pattern: alternating literal and field segments. Field
/// duplication and ambiguous adjacency are rejected at compile time, so
/// tokenization failures can only come from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern<F> {
    pattern: String,
    segments: Vec<Segment<F>>,
}

impl<F: Copy + PartialEq> CompiledPattern<F> {
    /// Compiles `pattern` against a placeholder table. Placeholders are
    /// matched in table order at each position, so the table must list
    /// longer placeholders before their prefixes (`yyyy` before `y`).
    pub fn compile(pattern: &str, placeholders: &[(&str, F)]) -> Result<Self, PatternError> {
        let mut segments: Vec<Segment<F>> = Vec::new();
        let mut literal = String::new();
        let mut seen: Vec<F> = Vec::new();
        let mut last_placeholder: Option<&str> = None;

        let mut offset = 0;
        'scan: while offset < pattern.len() {
            for &(placeholder, field) in placeholders {
                if pattern[offset..].starts_with(placeholder) {
                    if seen.contains(&field) {
                        return Err(PatternError::DuplicateField(placeholder.to_string()));
                    }
                    if literal.is_empty() {
                        if let Some(previous) = last_placeholder {
                            if matches!(segments.last(), Some(Segment::Field(_))) {
                                return Err(PatternError::AdjacentFields(
                                    previous.to_string(),
                                    placeholder.to_string(),
                                ));
                            }
                        }
                    } else {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                    seen.push(field);
                    last_placeholder = Some(placeholder);
                    offset += placeholder.len();
                    continue 'scan;
                }
            }
            match pattern[offset..].chars().next() {
                Some(ch) => {
                    literal.push(ch);
                    offset += ch.len_utf8();
                }
                None => break,
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        if seen.is_empty() {
            return Err(PatternError::NoFields);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Fields assigned by this pattern, in pattern order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(*field),
            Segment::Literal(_) => None,
        })
    }

    /// Splits `input` along the pattern's literals and returns the raw token
    /// captured for each field, in pattern order.
    pub fn tokenize<'a>(&self, input: &'a str) -> Result<Vec<(F, &'a str)>, PatternError> {
        let mut tokens = Vec::new();
        let mut position = 0;

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    if !input[position..].starts_with(literal.as_str()) {
                        return Err(PatternError::LiteralMismatch {
                            expected: literal.clone(),
                            offset: position,
                        });
                    }
                    position += literal.len();
                }
                Segment::Field(field) => {
                    let end = match self.segments.get(index + 1) {
                        Some(Segment::Literal(next)) => {
                            match input[position..].find(next.as_str()) {
                                Some(found) => position + found,
                                None => {
                                    return Err(PatternError::LiteralMismatch {
                                        expected: next.clone(),
                                        offset: position,
                                    })
                                }
                            }
                        }
                        // adjacency is rejected at compile time
                        _ => input.len(),
                    };
                    tokens.push((*field, &input[position..end]));
                    position = end;
                }
            }
        }

        if position != input.len() {
            return Err(PatternError::TrailingInput(input[position..].to_string()));
        }
        Ok(tokens)
    }
}
