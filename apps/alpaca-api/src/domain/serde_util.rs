//! Serde helpers for the API's wire formats.

use chrono::{DateTime, NaiveDateTime};

/// Canonical wire format for timestamps: local date-time, no zone.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Minute-precision timestamps are accepted on input.
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format a timestamp the way the API expects it in bodies and query strings.
#[must_use]
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a wire timestamp.
///
/// Zoned RFC 3339 values are converted to UTC and stripped of the offset.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, MINUTE_FORMAT))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_utc()))
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}

/// `NaiveDateTime` in the API's local date-time format.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(missing_docs)]
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    #[allow(missing_docs)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Nullable timestamps. Absent and `null` both decode to `None`.
///
/// Pair with `#[serde(default, skip_serializing_if = "Option::is_none")]`.
pub mod timestamp_option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    #[allow(missing_docs)]
    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&super::format_timestamp(v)),
            None => serializer.serialize_none(),
        }
    }

    #[allow(missing_docs)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_timestamp(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Integer quantities, which the API sends either as JSON numbers or as
/// numeric strings. Always encoded as numbers.
pub mod quantity {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    #[allow(missing_docs)]
    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }

    #[allow(missing_docs)]
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        match Raw::<T>::deserialize(deserializer)? {
            Raw::Number(value) => Ok(value),
            Raw::Text(text) => text
                .parse()
                .map_err(|e| serde::de::Error::custom(format!("invalid quantity '{text}': {e}"))),
        }
    }
}
