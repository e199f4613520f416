//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use crate::api::error::ApiError;
use crate::scoring::ScoringClient;

/// Shared context for all API routes and middleware: the database
/// location plus the scoring collaborator. Connections are opened per
/// request; the advice table and scoring client are process-wide.
#[derive(Clone)]
pub struct ApiContext {
    pub db_path: PathBuf,
    pub scorer: Arc<dyn ScoringClient>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, scorer: Arc<dyn ScoringClient>) -> Self {
        Self { db_path, scorer }
    }

    /// Open a database connection for the current request.
    pub fn open_db(&self) -> Result<rusqlite::Connection, ApiError> {
        crate::db::sqlite::open_database(&self.db_path).map_err(ApiError::from)
    }
}

/// Authenticated subject, injected into request extensions by the auth
/// middleware after successful token validation.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
    pub user_id: Uuid,
}
