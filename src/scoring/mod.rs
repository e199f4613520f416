//! External model-scoring collaborator.
//!
//! The model itself is a black box behind an HTTP contract:
//! `POST /predict` with the feature record, `GET /schema` for the
//! feature layout. Any transport error or non-success response fails
//! the whole prediction request — there is no degraded mode.

pub mod client;

pub use client::{HttpScoringClient, MockScoringClient, ScoreResponse, ScoringClient};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("cannot reach model service at {0}")]
    Connection(String),

    #[error("model service request timed out after {0}s")]
    Timeout(u64),

    #[error("model service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("invalid model service response: {0}")]
    ResponseParsing(String),

    #[error("http client error: {0}")]
    HttpClient(String),
}
