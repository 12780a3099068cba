//! Calendar-date handling for activity dates.
//!
//! The backend may answer with a plain `YYYY-MM-DD` or with a full timestamp;
//! forms and payloads only ever carry the date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reduce a date or timestamp to its (UTC) calendar date.
pub fn date_only(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
        return Some(stamp.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|stamp| stamp.date())
}

/// Form text for a date input.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDate>` fields: writes `YYYY-MM-DD`, reads
/// dates or timestamps.
pub mod calendar_date {
    use super::{date_only, format_date};
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&format_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => date_only(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {}", text))),
        }
    }
}
