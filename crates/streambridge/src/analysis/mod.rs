//! Crash-dump analysis.
//!
//! [`analyze`] turns the crash metadata reported by a device into a triage
//! summary:
//!
//! - **Signature**: a 16-hex-character SHA-256 fingerprint for deduplication.
//! - **Classification**: category, severity and remediation advice looked up
//!   from static error-code tables.
//! - **Stack trace summary**: frame count and top frame.
//!
//! Analysis never fails; missing fields fall back to placeholder values.
//!
//! # Example
//!
//! ```
//! use streambridge::analysis::{analyze, CrashDumpInput, Severity};
//!
//! let dump = CrashDumpInput {
//!     error_code: Some("0xC0000005".to_string()),
//!     stack_trace: Some("app!render\napp!main".to_string()),
//!     ..CrashDumpInput::default()
//! };
//!
//! let result = analyze(&dump);
//! assert_eq!(result.severity, Severity::Critical);
//! assert_eq!(result.stack_trace_analysis.frame_count, 2);
//! ```

mod classify;
mod signature;
mod stack;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

pub use classify::{
    categorize_error, determine_severity, normalize_error_code, recommendations, ErrorCategory,
    Severity, CRITICAL_CODES, DEFAULT_RECOMMENDATIONS, HIGH_CODES,
};
pub use signature::{compute_signature, is_known_issue, SIGNATURE_LEN, SIGNATURE_TRACE_CHARS};
pub use stack::{
    extract_top_frame, frame_count, StackTraceAnalysis, EMPTY_STACK_TRACE, MAX_TOP_FRAME_CHARS,
    NO_STACK_TRACE,
};

/// Dump ID used when none is supplied.
pub const DEFAULT_DUMP_ID: &str = "unknown";

/// Error code used when none is supplied.
pub const DEFAULT_ERROR_CODE: &str = "0x00000000";

/// Process name used when none is supplied.
pub const DEFAULT_PROCESS_NAME: &str = "unknown.exe";

/// Crash metadata as reported by a device.
///
/// Every field is optional; an explicit JSON `null` is treated the same as an
/// absent field. `dumpId` is only echoed and `memoryDumpUrl` is never read,
/// so both accept any JSON value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrashDumpInput {
    /// Identifier of the uploaded dump.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dump_id: Option<Value>,

    /// Error or exception code, e.g. `0xC0000005`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    /// Executable that crashed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,

    /// Newline-delimited stack frames, top frame first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,

    /// Location of the full memory dump. Not used by the analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_dump_url: Option<Value>,
}

impl CrashDumpInput {
    /// The dump ID, or [`DEFAULT_DUMP_ID`].
    #[must_use]
    pub fn dump_id(&self) -> Value {
        self.dump_id
            .clone()
            .unwrap_or_else(|| Value::from(DEFAULT_DUMP_ID))
    }

    /// The error code, or [`DEFAULT_ERROR_CODE`].
    #[must_use]
    pub fn error_code(&self) -> &str {
        self.error_code.as_deref().unwrap_or(DEFAULT_ERROR_CODE)
    }

    /// The process name, or [`DEFAULT_PROCESS_NAME`].
    #[must_use]
    pub fn process_name(&self) -> &str {
        self.process_name.as_deref().unwrap_or(DEFAULT_PROCESS_NAME)
    }

    /// The stack trace, or an empty string.
    #[must_use]
    pub fn stack_trace(&self) -> &str {
        self.stack_trace.as_deref().unwrap_or_default()
    }
}

/// Process details echoed in the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Name of the crashed process.
    pub name: String,
    /// Always `true` once analysis has run.
    pub analyzed: bool,
}

/// Triage summary for one crash dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Identifier of the analyzed dump, echoed as received.
    pub dump_id: Value,
    /// Deduplication fingerprint, see [`compute_signature`].
    pub crash_signature: String,
    /// Category of the error code.
    pub error_category: ErrorCategory,
    /// Triage severity of the error code.
    pub severity: Severity,
    /// The crashed process.
    pub process_info: ProcessInfo,
    /// Stack trace summary.
    pub stack_trace_analysis: StackTraceAnalysis,
    /// Ordered remediation advice.
    pub recommendations: Vec<String>,
    /// Whether the signature matches a known issue.
    pub is_known_issue: bool,
}

/// Analyze a crash dump.
#[must_use]
pub fn analyze(dump: &CrashDumpInput) -> AnalysisResult {
    let error_code = dump.error_code();
    let process_name = dump.process_name();
    let stack_trace = dump.stack_trace();

    let crash_signature = compute_signature(error_code, process_name, stack_trace);
    let is_known_issue = is_known_issue(&crash_signature);

    let result = AnalysisResult {
        dump_id: dump.dump_id(),
        error_category: categorize_error(error_code),
        severity: determine_severity(error_code),
        process_info: ProcessInfo {
            name: process_name.to_string(),
            analyzed: true,
        },
        stack_trace_analysis: StackTraceAnalysis::from_trace(stack_trace),
        recommendations: recommendations(error_code)
            .iter()
            .map(ToString::to_string)
            .collect(),
        crash_signature,
        is_known_issue,
    };

    info!(
        signature = %result.crash_signature,
        severity = %result.severity,
        "Crash analysis complete"
    );

    result
}

/// Prefix of `s` holding at most `max_chars` characters.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(error_code: &str, process_name: &str, stack_trace: &str) -> CrashDumpInput {
        CrashDumpInput {
            dump_id: Some(Value::from("dump-123")),
            error_code: Some(error_code.to_string()),
            process_name: Some(process_name.to_string()),
            stack_trace: Some(stack_trace.to_string()),
            memory_dump_url: None,
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("äöüß", 2), "äö");
    }

    #[test]
    fn test_analyze_general_failure() {
        let result = analyze(&dump("0x80004005", "a.exe", "f1\nf2"));

        assert_eq!(result.dump_id, "dump-123");
        assert_eq!(result.crash_signature, "9573309c728a3136");
        assert_eq!(result.error_category, ErrorCategory::GeneralFailure);
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.process_info.name, "a.exe");
        assert!(result.process_info.analyzed);
        assert!(result.stack_trace_analysis.has_stack_trace);
        assert_eq!(result.stack_trace_analysis.frame_count, 2);
        assert_eq!(result.stack_trace_analysis.top_frame, "f1");
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.recommendations[0], "Check for recent system updates");
        assert!(!result.is_known_issue);
    }

    #[test]
    fn test_analyze_defaults() {
        let result = analyze(&CrashDumpInput::default());

        assert_eq!(result.dump_id, "unknown");
        assert_eq!(result.crash_signature, "39dac9ff00951683");
        assert_eq!(result.error_category, ErrorCategory::Unknown);
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.process_info.name, "unknown.exe");
        assert!(!result.stack_trace_analysis.has_stack_trace);
        assert_eq!(result.stack_trace_analysis.frame_count, 0);
        assert_eq!(result.stack_trace_analysis.top_frame, NO_STACK_TRACE);
        assert_eq!(result.recommendations, vec!["Review crash dump manually"]);
        assert!(!result.is_known_issue);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let input = dump("0xC0000005", "game.exe", "render\nmain");
        assert_eq!(analyze(&input), analyze(&input));
    }

    #[test]
    fn test_analyze_signature_uses_raw_code_classification_does_not() {
        let lower = analyze(&dump("0xc0000005", "game.exe", "render"));
        let upper = analyze(&dump("0xC0000005", "game.exe", "render"));

        assert_ne!(lower.crash_signature, upper.crash_signature);
        assert_eq!(lower.error_category, upper.error_category);
        assert_eq!(lower.severity, Severity::Critical);
        assert_eq!(lower.recommendations, upper.recommendations);
    }

    #[test]
    fn test_analyze_ignores_memory_dump_url() {
        let mut with_url = dump("0x8007000E", "svc.exe", "alloc");
        let without_url = with_url.clone();
        with_url.memory_dump_url = Some(Value::from("https://dumps.example.com/1.dmp"));

        assert_eq!(analyze(&with_url), analyze(&without_url));
    }

    #[test]
    fn test_analysis_result_json_shape() {
        let json = serde_json::to_value(analyze(&dump("0x80070005", "a.exe", "x"))).unwrap();

        assert_eq!(json["dumpId"], "dump-123");
        assert_eq!(json["errorCategory"], "Access Denied");
        assert_eq!(json["severity"], "High");
        assert_eq!(json["processInfo"]["analyzed"], true);
        assert_eq!(json["stackTraceAnalysis"]["frameCount"], 1);
        assert_eq!(json["isKnownIssue"], false);
        assert_eq!(json["crashSignature"].as_str().unwrap().len(), SIGNATURE_LEN);
    }

    #[test]
    fn test_crash_dump_input_null_fields_use_defaults() {
        let input: CrashDumpInput =
            serde_json::from_str(r#"{"dumpId": null, "errorCode": "0x1"}"#).unwrap();

        assert_eq!(input.dump_id(), DEFAULT_DUMP_ID);
        assert_eq!(input.error_code(), "0x1");
        assert_eq!(input.process_name(), DEFAULT_PROCESS_NAME);
        assert_eq!(input.stack_trace(), "");
    }

    #[test]
    fn test_crash_dump_input_rejects_wrong_types_for_analyzed_fields() {
        for body in [
            r#"{"errorCode": 42}"#,
            r#"{"stackTrace": ["f1", "f2"]}"#,
            r#"{"processName": true}"#,
        ] {
            assert!(serde_json::from_str::<CrashDumpInput>(body).is_err(), "{body}");
        }
    }

    #[test]
    fn test_crash_dump_input_accepts_any_echoed_value() {
        let input: CrashDumpInput = serde_json::from_str(
            r#"{"dumpId": 981, "memoryDumpUrl": {"blob": "x"}, "errorCode": "0xC00000FD"}"#,
        )
        .unwrap();

        let result = analyze(&input);
        assert_eq!(result.dump_id, Value::from(981));
        assert_eq!(result.error_category, ErrorCategory::StackOverflow);
    }
}
