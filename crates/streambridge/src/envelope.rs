//! JSON envelopes exchanged with callers.
//!
//! Requests wrap the crash metadata in routing information about the device
//! that produced it; responses echo that information around the analysis.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{AnalysisResult, CrashDumpInput};

/// Value echoed for routing fields the caller did not supply.
pub const UNKNOWN: &str = "unknown";

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "StreamBridge Function App";

/// Name of the crash-dump operation, reported in response metadata.
pub const FUNCTION_NAME: &str = "ProcessCrashDump";

/// Service version reported in health and response metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current UTC time as RFC 3339 with microseconds and a `Z` suffix.
#[must_use]
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A JSON value rendered for log output: strings without quotes, anything
/// else as compact JSON.
#[must_use]
pub fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn echo_or_unknown(field: Option<&Value>) -> Value {
    field.cloned().unwrap_or_else(|| Value::from(UNKNOWN))
}

/// Inbound request body.
///
/// Routing fields are echoed back as received and `timestamp` is only
/// logged, so none of them is type-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Identifier of the source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<Value>,

    /// Device that reported the crash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<Value>,

    /// Region the device reported from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Value>,

    /// When the crash was reported, as sent by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,

    /// The crash metadata to analyze.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crash_dump: Option<CrashDumpInput>,
}

impl RequestEnvelope {
    /// The document ID, or [`UNKNOWN`].
    #[must_use]
    pub fn document_id(&self) -> Value {
        echo_or_unknown(self.document_id.as_ref())
    }

    /// The device ID, or [`UNKNOWN`].
    #[must_use]
    pub fn device_id(&self) -> Value {
        echo_or_unknown(self.device_id.as_ref())
    }

    /// The region, or [`UNKNOWN`].
    #[must_use]
    pub fn region(&self) -> Value {
        echo_or_unknown(self.region.as_ref())
    }

    /// The reported timestamp, or the current UTC time.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.timestamp
            .as_ref()
            .map_or_else(utc_timestamp, value_label)
    }

    /// The crash metadata; an absent object analyzes as all defaults.
    #[must_use]
    pub fn crash_dump(&self) -> CrashDumpInput {
        self.crash_dump.clone().unwrap_or_default()
    }
}

/// Metadata about the invocation that produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Always [`FUNCTION_NAME`].
    pub function_name: String,
    /// Service version.
    pub version: String,
    /// Time spent in analysis, e.g. `"0.042ms"`.
    pub execution_time: String,
}

impl ResponseMetadata {
    /// Metadata for an analysis that took `elapsed`.
    #[must_use]
    pub fn new(elapsed: std::time::Duration) -> Self {
        Self {
            function_name: FUNCTION_NAME.to_string(),
            version: VERSION.to_string(),
            execution_time: format!("{:.3}ms", elapsed.as_secs_f64() * 1000.0),
        }
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Echoed document ID.
    pub document_id: Value,
    /// Echoed device ID.
    pub device_id: Value,
    /// Echoed region.
    pub region: Value,
    /// When the response was produced.
    pub processed_at: String,
    /// The crash analysis.
    pub analysis: AnalysisResult,
    /// Invocation metadata.
    pub metadata: ResponseMetadata,
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// Short description of the failure kind.
    pub error: String,
    /// The underlying error message.
    pub message: String,
}

impl ErrorEnvelope {
    /// Create an error envelope.
    #[must_use]
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Health endpoint body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Always [`SERVICE_NAME`].
    pub service: String,
    /// Service version.
    pub version: String,
    /// When the health check ran.
    pub timestamp: String,
}

impl HealthResponse {
    /// The static health payload, stamped with the current time.
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            version: VERSION.to_string(),
            timestamp: utc_timestamp(),
        }
    }
}
