use chrono::{DateTime, NaiveDateTime, Utc};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// The only timestamp format accepted from the service.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses a `YYYY-MM-DDTHH:MM:SSZ` string into a UTC instant.
///
/// Any other format, including RFC 3339 strings with fractional seconds or
/// numeric offsets, is rejected.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

// Reads an optional timestamp field. `null` is kept as absent.
pub(crate) fn deserialize_optional<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    parse_timestamp(&value).map(Some).ok_or_else(|| {
        D::Error::custom(format_args!(
            "`{value}` is not a `YYYY-MM-DDTHH:MM:SSZ` timestamp"
        ))
    })
}
