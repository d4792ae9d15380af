//! Caller-facing error taxonomy for the recommendation core.
//!
//! Only input-shape problems surface here. Predictor failures are absorbed by
//! `ml_engine::Predictor` and never reach the caller as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The caller handed over a container that does not hold exactly one record.
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// A single record was supplied but its fields could not be decoded.
    #[error("Invalid soil record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}
