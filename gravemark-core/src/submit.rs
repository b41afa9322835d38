//! The persistence boundary.
//!
//! Storage is an external collaborator; this module owns the interface, the
//! record handed across it, and the driver that runs the whole pipeline and
//! maps a uniqueness-constraint conflict to an expected duplicate outcome.
//! The collaborator also enforces the server-side invariants the pipeline
//! cannot (only-hardcore rows, the display-name cap, and the authoritative
//! fingerprint dedup); the pipeline never assumes it is the sole writer.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

use crate::constants::MAX_DISPLAY_NAME_LEN;
use crate::error::IngestFailure;
use crate::policy::IngestOptions;
use crate::record::DeathPayload;
use crate::rules::{RulePolicy, RuleViolation};
use crate::{Ingestion, ingest};

/// Caller-supplied metadata accompanying the save text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitterMeta {
    pub submitter_id: String,
    pub display_name: String,
}

/// The row handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub submitter_id: String,
    pub display_name: String,
    pub fingerprint: String,
    #[serde(flatten)]
    pub payload: DeathPayload,
}

/// Failure kinds a record store may report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The fingerprint uniqueness constraint fired: this save was already
    /// submitted by this submitter.
    #[error("a record with this fingerprint already exists")]
    Duplicate,
    #[error("display name exceeds {MAX_DISPLAY_NAME_LEN} characters")]
    NameTooLong,
    #[error("record store rejected the submission: {0}")]
    Rejected(String),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// External record store collaborator.
pub trait DeathRecordStore {
    /// Insert one death record.
    ///
    /// # Errors
    ///
    /// [`StoreError::Duplicate`] when the fingerprint uniqueness constraint
    /// fires; other kinds for rejection or connectivity failure.
    fn insert(&self, record: &DeathRecord) -> Result<(), StoreError>;
}

/// Outcome of a submission that made it to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Inserted(DeathRecord),
    /// The store already holds this fingerprint. Expected whenever the same
    /// save is uploaded twice; not an error.
    Duplicate,
}

/// Errors from the full submit flow, spanning all tiers below the store's
/// duplicate case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Ingest(#[from] IngestFailure),
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Run the pipeline over `raw_text` and insert the resulting record.
///
/// A duplicate fingerprint surfaces as [`SubmitOutcome::Duplicate`], kept
/// distinct from validation and extraction failures so the caller can say
/// "already submitted" instead of a generic error. Nothing is retried.
///
/// # Errors
///
/// [`SubmitError`] for boundary, pipeline, rule, and non-duplicate store
/// failures.
pub fn submit<S: DeathRecordStore>(
    store: &S,
    raw_text: &str,
    meta: &SubmitterMeta,
    opts: &IngestOptions,
    rules: &RulePolicy,
) -> Result<SubmitOutcome, SubmitError> {
    let Ingestion { payload, fingerprint } = ingest(raw_text, &meta.submitter_id, opts)?;
    rules.check(&payload)?;
    let record = DeathRecord {
        submitter_id: meta.submitter_id.clone(),
        display_name: meta.display_name.clone(),
        fingerprint,
        payload,
    };
    match store.insert(&record) {
        Ok(()) => Ok(SubmitOutcome::Inserted(record)),
        Err(StoreError::Duplicate) => Ok(SubmitOutcome::Duplicate),
        Err(err) => Err(SubmitError::Store(err)),
    }
}

/// In-memory store enforcing the fingerprint uniqueness constraint and the
/// display-name cap. Backs tests and the CLI dry-run; real persistence lives
/// outside this crate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, DeathRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Fetch a stored record by fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: &str) -> Option<DeathRecord> {
        self.records.borrow().get(fingerprint).cloned()
    }
}

impl DeathRecordStore for MemoryStore {
    fn insert(&self, record: &DeathRecord) -> Result<(), StoreError> {
        if record.display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(StoreError::NameTooLong);
        }
        let mut records = self.records.borrow_mut();
        if records.contains_key(&record.fingerprint) {
            return Err(StoreError::Duplicate);
        }
        records.insert(record.fingerprint.clone(), record.clone());
        Ok(())
    }
}
