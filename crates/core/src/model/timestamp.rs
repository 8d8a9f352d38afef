use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

const SECONDS_PER_HOUR: i32 = 3600;

/// A reconstructed timestamp. Every field stays unset until some table
/// element or metadata entry provides it; unset fields fall back to a
/// caller-supplied reference time on conversion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timestamp {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub second: Option<u32>,
    /// Offset from UTC in whole hours.
    #[serde(default)]
    pub timezone_offset: Option<i32>,
}

impl Timestamp {
    pub fn is_empty(&self) -> bool {
        *self == Timestamp::default()
    }

    /// Last-write-wins merge: every field set on `other` overwrites the
    /// corresponding field of `self`.
    pub fn merge_from(&mut self, other: &Timestamp) {
        if other.year.is_some() {
            self.year = other.year;
        }
        if other.month.is_some() {
            self.month = other.month;
        }
        if other.day.is_some() {
            self.day = other.day;
        }
        if other.hour.is_some() {
            self.hour = other.hour;
        }
        if other.minute.is_some() {
            self.minute = other.minute;
        }
        if other.second.is_some() {
            self.second = other.second;
        }
        if other.timezone_offset.is_some() {
            self.timezone_offset = other.timezone_offset;
        }
    }

    /// Materializes the timestamp, filling unset fields from `reference`.
    pub fn to_datetime(&self, reference: &DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>> {
        let offset_hours = self
            .timezone_offset
            .unwrap_or(reference.offset().fix().local_minus_utc() / SECONDS_PER_HOUR);
        let offset = FixedOffset::east_opt(offset_hours * SECONDS_PER_HOUR).ok_or_else(|| {
            CoreError::InvalidTimestamp {
                reason: format!("timezone offset {offset_hours}h is out of range"),
            }
        })?;

        let date = NaiveDate::from_ymd_opt(
            self.year.unwrap_or_else(|| reference.year()),
            self.month.unwrap_or_else(|| reference.month()),
            self.day.unwrap_or_else(|| reference.day()),
        )
        .ok_or_else(|| CoreError::InvalidTimestamp {
            reason: format!("{self:?} does not describe a calendar date"),
        })?;
        let naive = date
            .and_hms_opt(
                self.hour.unwrap_or_else(|| reference.hour()),
                self.minute.unwrap_or_else(|| reference.minute()),
                self.second.unwrap_or_else(|| reference.second()),
            )
            .ok_or_else(|| CoreError::InvalidTimestamp {
                reason: format!("{self:?} does not describe a time of day"),
            })?;

        offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| CoreError::InvalidTimestamp {
                reason: format!("{naive} is not representable in offset {offset}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2000-01-01T00:00:00+01:00").unwrap()
    }

    #[test]
    fn merge_overwrites_only_set_fields() {
        let mut base = Timestamp {
            year: Some(2011),
            month: Some(10),
            day: Some(12),
            ..Timestamp::default()
        };
        let hours = Timestamp {
            hour: Some(14),
            ..Timestamp::default()
        };
        base.merge_from(&hours);

        assert_eq!(base.year, Some(2011));
        assert_eq!(base.hour, Some(14));
        assert_eq!(base.minute, None);
    }

    #[test]
    fn unset_fields_fall_back_to_the_reference_time() {
        let ts = Timestamp {
            year: Some(2011),
            month: Some(10),
            day: Some(12),
            hour: Some(14),
            minute: Some(30),
            ..Timestamp::default()
        };
        let resolved = ts.to_datetime(&reference()).unwrap();
        assert_eq!(resolved.to_rfc3339(), "2011-10-12T14:30:00+01:00");
    }

    #[test]
    fn explicit_timezone_wins_over_the_reference_offset() {
        let ts = Timestamp {
            year: Some(2011),
            month: Some(1),
            day: Some(1),
            hour: Some(0),
            minute: Some(0),
            second: Some(0),
            timezone_offset: Some(-5),
        };
        let resolved = ts.to_datetime(&reference()).unwrap();
        assert_eq!(resolved.to_rfc3339(), "2011-01-01T00:00:00-05:00");
    }

    #[test]
    fn impossible_dates_are_rejected() {
        let ts = Timestamp {
            year: Some(2011),
            month: Some(2),
            day: Some(30),
            ..Timestamp::default()
        };
        assert!(matches!(
            ts.to_datetime(&reference()),
            Err(CoreError::InvalidTimestamp { .. })
        ));
    }
}
