//! Timestamp - Paragraph creation and update dates
//!
//! Zeppelin writes dates in two shapes depending on the release:
//! `Feb 28, 2017 3:44:54 PM` (no zone) and `2015-07-03T01:43:40+0000`.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};

use crate::domain::errors::ConvertError;

const NAIVE_FORMATS: &[&str] = &[
    "%b %d, %Y %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// A notebook date, with or without a UTC offset
#[derive(Debug, Clone, Copy)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Parse any of the date layouts Zeppelin has exported
    pub fn parse(text: &str) -> Result<Self, ConvertError> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(Timestamp::Zoned(dt));
        }

        for fmt in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
                return Ok(Timestamp::Zoned(dt));
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
                return Ok(Timestamp::Naive(dt));
            }
        }

        Err(ConvertError::InvalidDate(text.to_string()))
    }

    /// Instant used for ordering; naive values are read as UTC
    fn instant(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(dt) => *dt,
            Timestamp::Zoned(dt) => dt.naive_utc(),
        }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant() == other.instant()
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant().cmp(&other.instant())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let base = "%Y-%m-%d %H:%M:%S";
        match self {
            Timestamp::Naive(dt) if dt.nanosecond() == 0 => write!(f, "{}", dt.format(base)),
            Timestamp::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.6f")),
            Timestamp::Zoned(dt) if dt.nanosecond() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%:z"))
            }
            Timestamp::Zoned(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.6f%:z")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zeppelin_062_date() {
        let ts = Timestamp::parse("Feb 28, 2017 3:44:54 PM").unwrap();
        assert!(matches!(ts, Timestamp::Naive(_)));
        assert_eq!(ts.to_string(), "2017-02-28 15:44:54");
    }

    #[test]
    fn test_parse_zoned_date() {
        let ts = Timestamp::parse("2015-07-03T01:43:40+0000").unwrap();
        assert!(matches!(ts, Timestamp::Zoned(_)));
        assert_eq!(ts.to_string(), "2015-07-03 01:43:40+00:00");
    }

    #[test]
    fn test_ordering_across_kinds() {
        let earlier = Timestamp::parse("Feb 28, 2017 3:44:54 PM").unwrap();
        let later = Timestamp::parse("2017-02-28T16:44:54+0000").unwrap();
        assert!(earlier < later);
        assert_eq!(
            Timestamp::parse("2017-02-28T15:44:54+0000").unwrap(),
            earlier
        );
    }

    #[test]
    fn test_invalid_date() {
        let err = Timestamp::parse("yesterday").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidDate(s) if s == "yesterday"));
    }
}
