//! Stack trace summary.

use serde::{Deserialize, Serialize};

use super::truncate_chars;

/// Top frame reported when no stack trace was supplied.
pub const NO_STACK_TRACE: &str = "No stack trace available";

/// Top frame reported when the stack trace is only whitespace.
pub const EMPTY_STACK_TRACE: &str = "Empty stack trace";

/// Maximum characters kept from the top frame.
pub const MAX_TOP_FRAME_CHARS: usize = 100;

/// Shape of a newline-delimited stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceAnalysis {
    /// Whether a non-empty trace was supplied.
    pub has_stack_trace: bool,
    /// Number of frames (lines) in the trace.
    pub frame_count: usize,
    /// First frame of the trace, or a placeholder.
    pub top_frame: String,
}

impl StackTraceAnalysis {
    /// Summarize a raw stack trace.
    #[must_use]
    pub fn from_trace(stack_trace: &str) -> Self {
        Self {
            has_stack_trace: !stack_trace.is_empty(),
            frame_count: frame_count(stack_trace),
            top_frame: extract_top_frame(stack_trace),
        }
    }
}

/// Count frames: one more than the number of newlines, or zero when empty.
///
/// The trace is not trimmed, so a trailing newline counts as an extra frame.
#[must_use]
pub fn frame_count(stack_trace: &str) -> usize {
    if stack_trace.is_empty() {
        0
    } else {
        stack_trace.matches('\n').count() + 1
    }
}

/// First line of the trimmed trace, capped at [`MAX_TOP_FRAME_CHARS`].
#[must_use]
pub fn extract_top_frame(stack_trace: &str) -> String {
    if stack_trace.is_empty() {
        return NO_STACK_TRACE.to_string();
    }

    let trimmed = stack_trace.trim();
    if trimmed.is_empty() {
        return EMPTY_STACK_TRACE.to_string();
    }

    let first_line = trimmed.split('\n').next().unwrap_or_default();
    truncate_chars(first_line, MAX_TOP_FRAME_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_frame_empty() {
        assert_eq!(extract_top_frame(""), "No stack trace available");
    }

    #[test]
    fn test_top_frame_whitespace_only() {
        assert_eq!(extract_top_frame("  \n\t "), "Empty stack trace");
    }

    #[test]
    fn test_top_frame_first_line() {
        assert_eq!(extract_top_frame("line1\nline2"), "line1");
        assert_eq!(extract_top_frame("\n\n  at main()\nat start()"), "at main()");
    }

    #[test]
    fn test_top_frame_keeps_carriage_return() {
        assert_eq!(extract_top_frame("frame0\r\nframe1"), "frame0\r");
    }

    #[test]
    fn test_top_frame_truncated() {
        let long = "a".repeat(250);
        assert_eq!(extract_top_frame(&long).len(), MAX_TOP_FRAME_CHARS);

        let wide = "ü".repeat(120);
        assert_eq!(extract_top_frame(&wide).chars().count(), MAX_TOP_FRAME_CHARS);
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(""), 0);
        assert_eq!(frame_count("one"), 1);
        assert_eq!(frame_count("f1\nf2"), 2);
        assert_eq!(frame_count("f1\nf2\n"), 3);
        assert_eq!(frame_count("   "), 1);
    }

    #[test]
    fn test_from_trace() {
        let analysis = StackTraceAnalysis::from_trace("ntdll!Foo\nkernel32!Bar\napp!main");
        assert!(analysis.has_stack_trace);
        assert_eq!(analysis.frame_count, 3);
        assert_eq!(analysis.top_frame, "ntdll!Foo");

        let empty = StackTraceAnalysis::from_trace("");
        assert!(!empty.has_stack_trace);
        assert_eq!(empty.frame_count, 0);
        assert_eq!(empty.top_frame, NO_STACK_TRACE);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(StackTraceAnalysis::from_trace("a\nb")).unwrap();
        assert_eq!(json["hasStackTrace"], true);
        assert_eq!(json["frameCount"], 2);
        assert_eq!(json["topFrame"], "a");
    }
}
