//! Time and timestamp helpers.

use chrono::{DateTime, NaiveDateTime, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Layouts accepted for ISO 8601 timestamps without an offset; read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339, minute precision with an offset, and offset-less
/// date-times (optionally suffixed with `Z`), which are taken as UTC.
///
/// # Errors
///
/// Returns the RFC 3339 parse error when no accepted layout matches.
pub fn parse_iso8601(value: &str) -> Result<Timestamp, chrono::ParseError> {
    let rfc3339 = match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => return Ok(ts.with_timezone(&Utc)),
        Err(err) => err,
    };
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"] {
        if let Ok(ts) = DateTime::parse_from_str(value, format) {
            return Ok(ts.with_timezone(&Utc));
        }
    }
    let naive = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .unwrap_or(value);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or(rfc3339)
}

/// Serde adapter accepting either an ISO 8601 string or epoch milliseconds.
///
/// Backends disagree on how they encode automation timestamps; both shapes
/// are accepted on input. Output is always RFC 3339.
pub mod flexible {
    use std::fmt;

    use chrono::DateTime;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    use super::{Timestamp, parse_iso8601};

    /// Serialize a timestamp as an RFC 3339 string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// Deserialize a timestamp from an ISO 8601 string or epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Fails when the value is neither a parseable string nor an in-range
    /// integer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }

    struct TimestampVisitor;

    impl Visitor<'_> for TimestampVisitor {
        type Value = Timestamp;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an ISO 8601 timestamp or epoch milliseconds")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            parse_iso8601(value).map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            DateTime::from_timestamp_millis(value)
                .ok_or_else(|| E::custom(format!("timestamp {value} out of range")))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            let millis = i64::try_from(value)
                .map_err(|_| E::custom(format!("timestamp {value} out of range")))?;
            self.visit_i64(millis)
        }

        #[allow(clippy::cast_possible_truncation)]
        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            if !value.is_finite() {
                return Err(E::custom("timestamp must be finite"));
            }
            self.visit_i64(value.trunc() as i64)
        }
    }
}
