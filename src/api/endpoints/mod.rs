//! API endpoint handlers.
//!
//! Handlers validate input, delegate to the pipeline and repositories,
//! and shape JSON responses. Auth-protected handlers receive the
//! subject from request extensions.

pub mod auth;
pub mod health;
pub mod prediction;
pub mod profile;
