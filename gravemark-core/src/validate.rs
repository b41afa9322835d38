//! Admissibility gate for incoming save documents.

use serde_json::Value;

use crate::error::IngestError;

pub const HARDCORE_FLAG: &str = "hardcoreModeEnabled";
pub const TOTAL_DEATHS: &str = "cumulativeTotalDeaths";
pub const PAST_RUNS: &str = "pastRunsData";

/// Verify the document is a legitimate hardcore-death submission and return
/// its run history.
///
/// Checks run cheapest-first and short-circuit with a distinct error kind.
/// The death count must be exactly one: the save accumulates deaths across a
/// character's whole history, so exactly one means this snapshot records the
/// character's first and final death rather than a stale or repeated save.
///
/// Deeper field problems are deliberately not checked here; they surface as
/// extraction failures with the offending field name.
///
/// # Errors
///
/// [`IngestError::InvalidStructure`], [`IngestError::NotHardcore`], or
/// [`IngestError::NoDeath`].
pub fn validate(doc: &Value) -> Result<&[Value], IngestError> {
    if !doc.is_object() {
        return Err(IngestError::InvalidStructure);
    }
    if doc.get(HARDCORE_FLAG).and_then(Value::as_bool) != Some(true) {
        return Err(IngestError::NotHardcore);
    }
    // as_f64 keeps 1 and 1.0 equivalent; a non-numeric count reads as absent.
    if doc.get(TOTAL_DEATHS).and_then(Value::as_f64) != Some(1.0) {
        return Err(IngestError::NoDeath);
    }
    let runs = doc
        .get(PAST_RUNS)
        .and_then(Value::as_array)
        .filter(|runs| !runs.is_empty())
        .ok_or(IngestError::InvalidStructure)?;
    Ok(runs.as_slice())
}
