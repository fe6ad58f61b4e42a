//! Crash signatures for deduplication.

use sha2::{Digest, Sha256};

use super::truncate_chars;

/// Number of hex characters kept from the SHA-256 digest.
pub const SIGNATURE_LEN: usize = 16;

/// Number of stack trace characters that contribute to the signature.
pub const SIGNATURE_TRACE_CHARS: usize = 100;

/// Signatures flagged as known issues.
///
/// These are kept verbatim; neither value is reachable from the digest
/// (the first is not even hex), so `is_known_issue` is false in practice.
const KNOWN_ISSUE_SIGNATURES: [&str; 2] = ["a1b2c3d4e5f6g7h8", "1234567890abcdef"];

/// Compute the crash signature for a dump.
///
/// The signature is the first [`SIGNATURE_LEN`] hex characters of
/// `SHA-256(error_code ++ process_name ++ stack_trace[..100 chars])`. Inputs
/// are hashed exactly as received, so the error code's case matters here even
/// though classification ignores it.
#[must_use]
pub fn compute_signature(error_code: &str, process_name: &str, stack_trace: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(error_code.as_bytes());
    hasher.update(process_name.as_bytes());
    hasher.update(truncate_chars(stack_trace, SIGNATURE_TRACE_CHARS).as_bytes());

    let mut signature = hex::encode(hasher.finalize());
    signature.truncate(SIGNATURE_LEN);
    signature
}

/// Check whether a signature belongs to the known-issue set.
#[must_use]
pub fn is_known_issue(signature: &str) -> bool {
    KNOWN_ISSUE_SIGNATURES.contains(&signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_shape() {
        let sig = compute_signature("0x80004005", "a.exe", "f1\nf2");
        assert_eq!(sig.len(), SIGNATURE_LEN);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_signature_known_values() {
        assert_eq!(
            compute_signature("0x80004005", "a.exe", "f1\nf2"),
            "9573309c728a3136"
        );
        assert_eq!(
            compute_signature("0x00000000", "unknown.exe", ""),
            "39dac9ff00951683"
        );
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = compute_signature("0xC0000005", "app.exe", "main\nworker");
        let b = compute_signature("0xC0000005", "app.exe", "main\nworker");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_ignores_trace_past_limit() {
        let base = "x".repeat(SIGNATURE_TRACE_CHARS);
        let a = compute_signature("0x1", "p.exe", &format!("{base}tail-one"));
        let b = compute_signature("0x1", "p.exe", &format!("{base}something else"));
        assert_eq!(a, b);
        assert_eq!(a, compute_signature("0x1", "p.exe", &base));
    }

    #[test]
    fn test_signature_counts_characters_not_bytes() {
        let trace = "é".repeat(150);
        assert_eq!(
            compute_signature("0xC0000005", "app.exe", &trace),
            "6ea28421bb4e2fea"
        );
    }

    #[test]
    fn test_signature_is_case_sensitive() {
        let lower = compute_signature("0xc0000005", "app.exe", "frame");
        let upper = compute_signature("0xC0000005", "app.exe", "frame");
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_signature_changes_with_process_name() {
        let a = compute_signature("0x1", "a.exe", "frame");
        let b = compute_signature("0x1", "b.exe", "frame");
        assert_ne!(a, b);
    }

    #[test]
    fn test_known_issue_membership() {
        assert!(is_known_issue("1234567890abcdef"));
        assert!(is_known_issue("a1b2c3d4e5f6g7h8"));
        assert!(!is_known_issue("9573309c728a3136"));
        assert!(!is_known_issue(""));
    }
}
