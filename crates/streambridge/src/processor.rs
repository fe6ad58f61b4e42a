//! The request pipeline shared by the HTTP endpoint and the CLI.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info};

use crate::analysis::analyze;
use crate::envelope::{
    utc_timestamp, value_label, RequestEnvelope, ResponseEnvelope, ResponseMetadata,
};
use crate::error::{Error, Result};

/// Parse a raw request body.
///
/// Syntax errors are reported as [`Error::InvalidPayload`]. A body that is
/// valid JSON but has the wrong shape (a top-level array, a number where a
/// string belongs) fails later, as [`Error::ProcessingFailure`].
///
/// # Errors
///
/// Returns an error if the body is not JSON or not a request object.
pub fn parse_request(body: &[u8]) -> Result<RequestEnvelope> {
    let value: Value = serde_json::from_slice(body).map_err(Error::InvalidPayload)?;
    serde_json::from_value(value).map_err(Error::processing)
}

/// Run a parsed request through analysis and wrap the result.
#[must_use]
pub fn process_request(request: &RequestEnvelope) -> ResponseEnvelope {
    let document_id = request.document_id();
    let device_id = request.device_id();
    let region = request.region();

    info!(device_id = %value_label(&device_id), "Processing crash dump");
    info!(
        document_id = %value_label(&document_id),
        region = %value_label(&region),
        "Request routing"
    );
    debug!(timestamp = %request.timestamp(), "Reported crash time");

    let started = Instant::now();
    let analysis = analyze(&request.crash_dump());
    let metadata = ResponseMetadata::new(started.elapsed());

    ResponseEnvelope {
        success: true,
        document_id,
        device_id,
        region,
        processed_at: utc_timestamp(),
        analysis,
        metadata,
    }
}

/// Parse, analyze and serialize a raw request body.
///
/// # Errors
///
/// Returns [`Error::InvalidPayload`] for malformed JSON and
/// [`Error::ProcessingFailure`] for anything else that goes wrong.
pub fn process_crash_dump(body: &[u8]) -> Result<Vec<u8>> {
    let request = parse_request(body)?;
    let response = process_request(&request);
    let bytes = serde_json::to_vec(&response).map_err(Error::processing)?;
    info!(
        document_id = %value_label(&response.document_id),
        signature = %response.analysis.crash_signature,
        "Crash dump processed successfully"
    );
    Ok(bytes)
}
