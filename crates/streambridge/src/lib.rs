//! `streambridge` - Crash-dump metadata triage service
//!
//! This library fingerprints and classifies crash-dump metadata reported by
//! devices and exposes the analysis over HTTP.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod processor;
pub mod server;

pub use analysis::{analyze, AnalysisResult, CrashDumpInput, ErrorCategory, Severity};
pub use config::Config;
pub use envelope::{ErrorEnvelope, HealthResponse, RequestEnvelope, ResponseEnvelope};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use server::{router, serve};
