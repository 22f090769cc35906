//! HTTP client for the Philter text-redaction API
//!
//! This crate contains:
//! - `PhilterClient`: a pooled reqwest client bound to one API endpoint
//! - An opt-in trust-all TLS mode for self-signed development deployments
//! - `FilterResult`: the redacted text and document id the service returns

pub mod client;
pub mod error;

pub use client::{FilterResult, PhilterClient, PhilterClientBuilder, DEFAULT_TIMEOUT_SECS};
pub use error::{ClientError, Result};
