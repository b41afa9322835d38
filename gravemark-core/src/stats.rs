//! Serialized-list resolver.
//!
//! The save format stores statistics as a sparse sequence of key/value pairs
//! nested under a `_serializedList` member rather than as a direct mapping.
//! Keys are not guaranteed present or unique; the first match wins. Whether
//! absence means "zero" or "malformed save" is decided per field by the
//! policy table, not here.

use serde_json::Value;

use crate::error::IngestError;

/// Member of a stat-bearing object holding the key/value pairs.
pub const SERIALIZED_LIST: &str = "_serializedList";

fn scan(owner: Option<&Value>, key: &str) -> Option<f64> {
    let entries = owner?.get(SERIALIZED_LIST)?.as_array()?;
    for entry in entries {
        if entry.get("key").and_then(Value::as_str) == Some(key) {
            return entry.get("value").and_then(Value::as_f64);
        }
    }
    None
}

/// Optional lookup: an absent list, key, or non-numeric value reads as zero.
#[must_use]
pub fn lookup_optional(owner: Option<&Value>, key: &str) -> f64 {
    scan(owner, key).unwrap_or(0.0)
}

/// Required lookup: absence fails ingestion, naming the offending key.
///
/// # Errors
///
/// [`IngestError::MissingField`] when the list is absent or malformed, the
/// key is not present, or its value is not numeric.
pub fn lookup_required(owner: Option<&Value>, key: &'static str) -> Result<f64, IngestError> {
    scan(owner, key).ok_or(IngestError::MissingField(key))
}
