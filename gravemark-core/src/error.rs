//! Error taxonomy for save ingestion.

use thiserror::Error;

use crate::document::ParseError;

/// Which tier of the pipeline rejected the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// The document is not an admissible hardcore-death submission at all.
    Validation,
    /// The document passed validation but lacks data the pipeline cannot
    /// proceed without, which means a corrupt save or an unhandled schema
    /// revision.
    Extraction,
}

/// A pipeline failure. Every kind identifies what was wrong with the
/// document; required-field failures carry the offending key so the failure
/// is diagnosable. Nothing here is ever silently defaulted or retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("save document is not a recognizable object")]
    InvalidStructure,
    #[error("save is not from a hardcore character")]
    NotHardcore,
    #[error("save does not record exactly one permanent death")]
    NoDeath,
    #[error("required field `{0}` is missing or not numeric")]
    MissingField(&'static str),
    #[error("final run carries no damage history")]
    NoDamageHistory,
}

impl IngestError {
    /// Classify this failure into the two-tier taxonomy.
    #[must_use]
    pub const fn tier(&self) -> ErrorTier {
        match self {
            Self::InvalidStructure | Self::NotHardcore | Self::NoDeath => ErrorTier::Validation,
            Self::MissingField(_) | Self::NoDamageHistory => ErrorTier::Extraction,
        }
    }
}

/// Either a boundary rejection of the raw text or a pipeline failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestFailure {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Document(#[from] IngestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_partition_the_kinds() {
        assert_eq!(IngestError::InvalidStructure.tier(), ErrorTier::Validation);
        assert_eq!(IngestError::NotHardcore.tier(), ErrorTier::Validation);
        assert_eq!(IngestError::NoDeath.tier(), ErrorTier::Validation);
        assert_eq!(IngestError::MissingField("RunTime").tier(), ErrorTier::Extraction);
        assert_eq!(IngestError::NoDamageHistory.tier(), ErrorTier::Extraction);
    }

    #[test]
    fn missing_field_names_the_key() {
        let msg = IngestError::MissingField("RunTime").to_string();
        assert!(msg.contains("RunTime"));
    }
}
