//! Error-code classification tables.
//!
//! Error codes are matched case-insensitively: `0xc0000005`, `0XC0000005` and
//! `0xC0000005` all resolve to the same entry.

use serde::{Deserialize, Serialize};

/// Human-readable category for an error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// `0x80004005` (`E_FAIL`).
    #[serde(rename = "General Failure")]
    GeneralFailure,
    /// `0x80070005` (`E_ACCESSDENIED`).
    #[serde(rename = "Access Denied")]
    AccessDenied,
    /// `0x8007000E` (`E_OUTOFMEMORY`).
    #[serde(rename = "Out of Memory")]
    OutOfMemory,
    /// `0x80070057` (`E_INVALIDARG`).
    #[serde(rename = "Invalid Parameter")]
    InvalidParameter,
    /// `0xC0000005` (`STATUS_ACCESS_VIOLATION`).
    #[serde(rename = "Access Violation")]
    AccessViolation,
    /// `0xC00000FD` (`STATUS_STACK_OVERFLOW`).
    #[serde(rename = "Stack Overflow")]
    StackOverflow,
    /// Any code not in the table.
    #[serde(rename = "Unknown Error Type")]
    Unknown,
}

impl ErrorCategory {
    /// The label used in analysis output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GeneralFailure => "General Failure",
            Self::AccessDenied => "Access Denied",
            Self::OutOfMemory => "Out of Memory",
            Self::InvalidParameter => "Invalid Parameter",
            Self::AccessViolation => "Access Violation",
            Self::StackOverflow => "Stack Overflow",
            Self::Unknown => "Unknown Error Type",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse triage label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Anything outside the critical and high sets.
    Medium,
    /// Permission and generic failures.
    High,
    /// Memory corruption and exhaustion.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Codes classified as [`Severity::Critical`].
pub const CRITICAL_CODES: [&str; 3] = ["0xC0000005", "0xC00000FD", "0x8007000E"];

/// Codes classified as [`Severity::High`]. Disjoint from [`CRITICAL_CODES`].
pub const HIGH_CODES: [&str; 2] = ["0x80070005", "0x80004005"];

/// Fallback advice for codes without a dedicated entry.
pub const DEFAULT_RECOMMENDATIONS: &[&str] = &["Review crash dump manually"];

/// Canonical spelling of an error code: lowercase `0x`, uppercase digits.
#[must_use]
pub fn normalize_error_code(error_code: &str) -> String {
    let upper = error_code.to_uppercase();
    match upper.strip_prefix("0X") {
        Some(digits) => format!("0x{digits}"),
        None => upper,
    }
}

/// Map an error code to its category.
#[must_use]
pub fn categorize_error(error_code: &str) -> ErrorCategory {
    match normalize_error_code(error_code).as_str() {
        "0x80004005" => ErrorCategory::GeneralFailure,
        "0x80070005" => ErrorCategory::AccessDenied,
        "0x8007000E" => ErrorCategory::OutOfMemory,
        "0x80070057" => ErrorCategory::InvalidParameter,
        "0xC0000005" => ErrorCategory::AccessViolation,
        "0xC00000FD" => ErrorCategory::StackOverflow,
        _ => ErrorCategory::Unknown,
    }
}

/// Map an error code to its severity. The critical set is consulted first.
#[must_use]
pub fn determine_severity(error_code: &str) -> Severity {
    let code = normalize_error_code(error_code);
    if CRITICAL_CODES.contains(&code.as_str()) {
        Severity::Critical
    } else if HIGH_CODES.contains(&code.as_str()) {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Ordered remediation advice for an error code.
#[must_use]
pub fn recommendations(error_code: &str) -> &'static [&'static str] {
    match normalize_error_code(error_code).as_str() {
        "0x80004005" => &[
            "Check for recent system updates",
            "Verify application dependencies",
            "Review event logs for additional context",
        ],
        "0x80070005" => &[
            "Verify user permissions",
            "Check file/folder access rights",
            "Review security policies",
        ],
        "0x8007000E" => &[
            "Increase available memory",
            "Check for memory leaks",
            "Consider horizontal scaling",
        ],
        "0xC0000005" => &[
            "Update to latest application version",
            "Check for null pointer issues",
            "Review memory access patterns",
        ],
        _ => DEFAULT_RECOMMENDATIONS,
    }
}
