//! The prediction pipeline: normalize → encode → score → advise → persist.
//!
//! Encoding is total — malformed form fields degrade to safe defaults.
//! Scoring and persistence failures abort the request with no partial
//! record; the caller may retry the whole operation.

pub mod advice;
pub mod encoder;
pub mod normalize;
pub mod orchestrator;

pub use orchestrator::{run_prediction, PredictionOutcome};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("model scoring failed: {0}")]
    Scoring(#[from] crate::scoring::ScoringError),

    #[error("failed to persist prediction: {0}")]
    Storage(#[from] crate::db::DatabaseError),
}
