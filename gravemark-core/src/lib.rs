//! Gravemark save ingestion pipeline.
//!
//! Converts a hardcore character's save snapshot (untrusted JSON produced by
//! a versioned, uncontrolled game client) into a canonical death record and
//! a dedup fingerprint: structural validation → field extraction → career
//! aggregation → loadout resolution → fingerprinting.
//!
//! The pipeline is a pure, single-pass transform with no internal state: the
//! same text and submitter always produce the same payload and the same
//! fingerprint. Authoritative deduplication happens at the persistence
//! boundary (see [`submit`]), never in-process.

pub mod career;
pub mod constants;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod loadout;
pub mod policy;
pub mod record;
pub mod rules;
pub mod run;
pub mod stats;
pub mod submit;
pub mod validate;

// Re-export commonly used types
pub use career::{CareerTotals, aggregate_career};
pub use document::{ParseError, parse_document};
pub use error::{ErrorTier, IngestError, IngestFailure};
pub use fingerprint::FINGERPRINT_LEN;
pub use loadout::{SkillIds, resolve_loadout};
pub use policy::{
    CareerTotalsPolicy, FieldPolicy, FieldSpec, IngestOptions, LoadoutPolicy, StatSource,
};
pub use record::DeathPayload;
pub use rules::{RulePolicy, RuleViolation};
pub use run::{FinalRunStats, extract_final_run};
pub use submit::{
    DeathRecord, DeathRecordStore, MemoryStore, StoreError, SubmitError, SubmitOutcome,
    SubmitterMeta, submit,
};

use serde_json::Value;

/// Payload and fingerprint for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingestion {
    pub payload: DeathPayload,
    pub fingerprint: String,
}

/// Extract the canonical payload from an already-parsed document.
///
/// # Errors
///
/// Validation-tier kinds when the document is not an admissible hardcore
/// death, extraction-tier kinds when required data is missing; see
/// [`IngestError`].
pub fn extract_payload(doc: &Value, opts: &IngestOptions) -> Result<DeathPayload, IngestError> {
    let runs = validate::validate(doc)?;
    let Some(fatal_run) = runs.last() else {
        return Err(IngestError::InvalidStructure);
    };
    let final_run = run::extract_final_run(fatal_run)?;
    let totals = career::aggregate_career(runs);
    let skill_ids = loadout::resolve_loadout(doc, opts.loadout);
    record::assemble(doc, &final_run, &totals, skill_ids, opts)
}

/// Run the full pipeline over raw save text for one submitter.
///
/// The fingerprint is computed over the original text, so byte-identical
/// re-uploads map to the same fingerprint.
///
/// # Errors
///
/// [`IngestFailure`] covering both boundary rejections and pipeline
/// failures.
pub fn ingest(
    raw_text: &str,
    submitter_id: &str,
    opts: &IngestOptions,
) -> Result<Ingestion, IngestFailure> {
    let doc = document::parse_document(raw_text)?;
    let payload = extract_payload(&doc, opts)?;
    let fingerprint = fingerprint::compute(submitter_id, raw_text);
    Ok(Ingestion { payload, fingerprint })
}
