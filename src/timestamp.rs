//! Local wall-clock timestamps, as exchanged with the task store
//!
//! The store sends timestamps such as `2024-02-10T09:00:00`, with no timezone suffix.
//! They are interpreted in the local timezone of the client. Timestamps that carry an offset
//! are converted to local time.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidTimestamp;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A timestamp as received from the store.
///
/// The raw text is always kept, so that a timestamp that cannot be parsed is sent back unchanged.
#[derive(Clone, Debug)]
pub struct Timestamp {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

/// An empty, invalid timestamp
impl Default for Timestamp {
    fn default() -> Self {
        Self { raw: String::new(), parsed: None }
    }
}

impl Timestamp {
    /// Wrap a local date and time. The raw form uses second precision.
    pub fn from_local(datetime: NaiveDateTime) -> Self {
        Self {
            raw: datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            parsed: Some(datetime),
        }
    }

    /// Parse some text. This never fails: see [`Self::is_valid`]
    pub fn parse<S: Into<String>>(raw: S) -> Self {
        let raw = raw.into();
        let parsed = parse_local(&raw);
        if parsed.is_none() {
            log::debug!("Unable to parse timestamp {:?}", raw);
        }
        Self { raw, parsed }
    }

    pub fn raw(&self) -> &str { &self.raw }
    pub fn is_valid(&self) -> bool { self.parsed.is_some() }

    /// The local date and time, or `None` if the raw text is not a valid timestamp
    pub fn local(&self) -> Option<NaiveDateTime> {
        self.parsed
    }

    /// The local calendar day
    pub fn date(&self) -> Option<NaiveDate> {
        self.parsed.map(|dt| dt.date())
    }

    /// Same as [`Self::local`], but reports why it failed
    pub fn try_local(&self) -> Result<NaiveDateTime, InvalidTimestamp> {
        self.parsed.ok_or_else(|| InvalidTimestamp { raw: self.raw.clone() })
    }
}

fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Two timestamps are equal if they denote the same local time, or if both are invalid with the same raw text
impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        match (self.parsed, other.parsed) {
            (Some(l), Some(r)) => l == r,
            (None, None) => self.raw == other.raw,
            _ => false,
        }
    }
}
impl Eq for Timestamp {}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_local(datetime)
    }
}

impl FromStr for Timestamp {
    type Err = InvalidTimestamp;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ts = Self::parse(s);
        ts.try_local()?;
        Ok(ts)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.raw)
    }
}

/// Used to support serde
impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A null timestamp is kept as an invalid, empty one
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Timestamp::parse(raw.unwrap_or_default()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn parses_store_formats() {
        assert_eq!(Timestamp::parse("2024-02-10T09:00:00").local(), Some(ymd_hms(2024, 2, 10, 9, 0, 0)));
        assert_eq!(Timestamp::parse("2024-02-10T09:00").local(), Some(ymd_hms(2024, 2, 10, 9, 0, 0)));
        assert_eq!(Timestamp::parse("2024-02-10T09:00:00.123").date(), NaiveDate::from_ymd_opt(2024, 2, 10));
        assert_eq!(Timestamp::parse("2024-02-10 23:59").local(), Some(ymd_hms(2024, 2, 10, 23, 59, 0)));
        assert_eq!(Timestamp::parse("2024-02-10").local(), Some(ymd_hms(2024, 2, 10, 0, 0, 0)));
    }

    #[test]
    fn offsets_are_converted_to_local_time() {
        let ts = Timestamp::parse("2024-02-10T09:00:00+00:00");
        let expected = DateTime::parse_from_rfc3339("2024-02-10T09:00:00+00:00").unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(ts.local(), Some(expected));
    }

    #[test]
    fn invalid_timestamps_keep_their_text() {
        let ts = Timestamp::parse("next tuesday");
        assert!(ts.is_valid() == false);
        assert_eq!(ts.date(), None);
        assert_eq!(ts.try_local(), Err(InvalidTimestamp { raw: "next tuesday".to_string() }));
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"next tuesday\"");
        assert!("2024-13-40".parse::<Timestamp>().is_err());
    }

    #[test]
    fn serde_keeps_the_raw_text() {
        let ts: Timestamp = serde_json::from_str("\"2024-02-10T09:00\"").unwrap();
        assert_eq!(ts.raw(), "2024-02-10T09:00");
        assert_eq!(ts, Timestamp::from_local(ymd_hms(2024, 2, 10, 9, 0, 0)));
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-02-10T09:00\"");
    }
}
