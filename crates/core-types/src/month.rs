use crate::error::CoreError;
use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Years a month key can represent; anything else would not render as four digits.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar month, the time-bucketing grain of every trend view.
///
/// Renders as `YYYY-MM`. Field order makes the derived `Ord` chronological,
/// which is also the lexicographic order of the rendered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidInput(
                "month".to_string(),
                month.to_string(),
            ));
        }
        if !YEAR_RANGE.contains(&year) {
            return Err(CoreError::InvalidInput("year".to_string(), year.to_string()));
        }
        Ok(Self { year, month })
    }

    /// Truncates a timestamp to its month, in the timestamp's own offset.
    ///
    /// `None` when the year falls outside `YEAR_RANGE`.
    pub fn from_timestamp(timestamp: &DateTime<FixedOffset>) -> Option<Self> {
        Self::new(timestamp.year(), timestamp.month()).ok()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidInput("month key".to_string(), s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        MonthKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_zero_padded() {
        let key = MonthKey::new(2024, 3).unwrap();
        assert_eq!(key.to_string(), "2024-03");
    }

    #[test]
    fn ordering_is_chronological() {
        let mut keys = vec![
            MonthKey::new(2024, 10).unwrap(),
            MonthKey::new(2023, 12).unwrap(),
            MonthKey::new(2024, 2).unwrap(),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2023-12", "2024-02", "2024-10"]);

        let mut lexical = rendered.clone();
        lexical.sort();
        assert_eq!(lexical, rendered);
    }

    #[test]
    fn parses_its_own_rendering() {
        let key: MonthKey = "2025-11".parse().unwrap();
        assert_eq!(key, MonthKey::new(2025, 11).unwrap());
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("2025-1".parse::<MonthKey>().is_err());
        assert!("202511".parse::<MonthKey>().is_err());
        assert!("abcd-01".parse::<MonthKey>().is_err());
    }

    #[test]
    fn truncation_uses_the_local_offset() {
        let ts = DateTime::parse_from_rfc3339("2024-03-31T23:30:00-08:00").unwrap();
        assert_eq!(MonthKey::from_timestamp(&ts).unwrap().to_string(), "2024-03");
    }

    #[test]
    fn years_outside_four_digits_have_no_key() {
        assert!(MonthKey::new(0, 1).is_err());
        assert!(MonthKey::new(10000, 1).is_err());
        assert!("0000-01".parse::<MonthKey>().is_err());

        let ts: DateTime<FixedOffset> = chrono::NaiveDate::from_ymd_opt(12345, 3, 5)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap()
            .and_utc()
            .into();
        assert_eq!(MonthKey::from_timestamp(&ts), None);
    }
}
