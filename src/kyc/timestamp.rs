//! Timestamp normalization
//!
//! Incoming timestamps may carry any UTC offset or none at all, or be a
//! Unix timestamp number. Everything is normalized to UTC before it reaches
//! the store.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Numbers larger than this are taken as milliseconds rather than seconds.
const MILLIS_THRESHOLD: f64 = 2e10;

/// Timestamp as it may appear in JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Parse an RFC 3339 timestamp, or a naive one which is taken as UTC.
pub fn parse(input: &str) -> Result<DateTime<Utc>, String> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(format!("invalid timestamp '{}'", input))
}

/// Convert a Unix timestamp in seconds (or milliseconds, past 2e10) to UTC.
pub fn from_unix(value: f64) -> Result<DateTime<Utc>, String> {
    if !value.is_finite() {
        return Err(format!("invalid unix timestamp {}", value));
    }
    let millis = if value.abs() > MILLIS_THRESHOLD {
        value
    } else {
        value * 1000.0
    };
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
        .ok_or_else(|| format!("unix timestamp {} out of range", value))
}

/// serde helper for `Option<DateTime<Utc>>` fields: strings go through
/// [`parse`], numbers through [`from_unix`].
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawTimestamp> = Option::deserialize(deserializer)?;
    let parsed = match raw {
        None => return Ok(None),
        Some(RawTimestamp::Text(s)) => parse(&s),
        Some(RawTimestamp::Integer(secs)) if (secs as f64).abs() <= MILLIS_THRESHOLD => {
            DateTime::<Utc>::from_timestamp(secs, 0)
                .ok_or_else(|| format!("unix timestamp {} out of range", secs))
        }
        Some(RawTimestamp::Integer(value)) => from_unix(value as f64),
        Some(RawTimestamp::Float(value)) => from_unix(value),
    };
    parsed.map(Some).map_err(serde::de::Error::custom)
}
