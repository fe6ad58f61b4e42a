//! HTTP handlers.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::envelope::HealthResponse;
use crate::error::Result;
use crate::processor;

/// `POST /ProcessCrashDump`: analyze the crash dump in the request body.
///
/// The body is read as raw bytes so that malformed JSON and unreadable or
/// oversized bodies are answered with an error envelope instead of axum's
/// plain-text rejection.
///
/// # Errors
///
/// Returns 400 for malformed JSON, the extractor's status (413 for an
/// oversized body) when the body cannot be read, and 500 for any other
/// failure, all as error envelopes.
pub async fn process_crash_dump(
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    info!("ProcessCrashDump function triggered");

    let body = body?;
    let json = processor::process_crash_dump(&body)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}

/// `GET /health`: static liveness payload.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
