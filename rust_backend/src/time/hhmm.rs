//! Serde codec for `HH:MM` time-of-day strings.
//!
//! The booking frontend stores times as `"09:00"`. A zero seconds field is
//! accepted on input (`"09:00:00"`); slots live on whole minutes, so any other
//! seconds value is rejected.

use chrono::{NaiveTime, Timelike};
use serde::{de::Error, Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%H:%M";

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(D::Error::custom)
}

/// Parse `HH:MM` or `HH:MM:00`.
///
/// # Examples
///
/// ```
/// use barber_booking::time::hhmm;
///
/// let t = hhmm::parse("09:40").unwrap();
/// assert_eq!(hhmm::format(t), "09:40");
/// assert!(hhmm::parse("9h40").is_err());
/// assert!(hhmm::parse("09:40:30").is_err());
/// ```
pub fn parse(raw: &str) -> Result<NaiveTime, String> {
    let trimmed = raw.trim();
    let time = NaiveTime::parse_from_str(trimmed, FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| format!("invalid time of day '{}': {}", raw, e))?;

    if !is_whole_minute(time) {
        return Err(format!(
            "invalid time of day '{}': seconds must be zero",
            raw
        ));
    }
    Ok(time)
}

/// True when `time` has no seconds or sub-second part.
pub fn is_whole_minute(time: NaiveTime) -> bool {
    time.second() == 0 && time.nanosecond() == 0
}

pub fn format(time: NaiveTime) -> String {
    time.format(FORMAT).to_string()
}
