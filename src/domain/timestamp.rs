//! Wire format for timestamps: UTC, microsecond precision, literal `Z`.

use chrono::{DateTime, Utc};
use serde::Serializer;

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub fn format(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

/// For `#[serde(serialize_with = "...")]` on `DateTime<Utc>` fields.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}
