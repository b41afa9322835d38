//! Dedup fingerprinting of raw submissions.

use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Hex length of a fingerprint (SHA-256).
pub const FINGERPRINT_LEN: usize = 64;

/// Digest `submitter_id || "|" || raw_text` to a lowercase hex string.
///
/// The digest covers the original text exactly as uploaded, not a
/// re-serialization of the parsed tree: two logically identical documents
/// differing only in whitespace or key order fingerprint differently. That
/// is the contract: re-uploading the same file yields the same fingerprint,
/// which is what the persistence layer's uniqueness constraint keys on. It
/// does not defend against semantically identical re-serializations.
#[must_use]
pub fn compute(submitter_id: &str, raw_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(submitter_id.as_bytes());
    hasher.update(b"|");
    hasher.update(raw_text.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(FINGERPRINT_LEN);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_length_lowercase_hex() {
        let fp = compute("user-1", r#"{"a":1}"#);
        assert_eq!(fp.len(), FINGERPRINT_LEN);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn identical_input_is_stable() {
        let text = r#"{"hardcoreModeEnabled":true}"#;
        assert_eq!(compute("user-1", text), compute("user-1", text));
    }

    #[test]
    fn whitespace_variants_do_not_collide() {
        let a = compute("user-1", r#"{"a":1}"#);
        let b = compute("user-1", r#"{ "a": 1 }"#);
        assert_ne!(a, b);
    }

    #[test]
    fn submitters_do_not_collide() {
        let text = r#"{"a":1}"#;
        assert_ne!(compute("user-1", text), compute("user-2", text));
    }
}
