//! API middleware.
//!
//! Every protected route passes through the bearer-token validator,
//! which scopes the request to exactly one authenticated subject.

pub mod auth;
