//! Bearer token authentication middleware.
//!
//! Extracts `Authorization: Bearer <token>`, resolves the owning user
//! via the sessions table, and injects [`AuthedUser`] into request
//! extensions for downstream handlers.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthedUser};
use crate::auth::hash_token;
use crate::db::repository::session::owner_for_token;

/// Require a valid session token from a logged-in user.
pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    let token_hash = hash_token(&token);

    let owner = {
        let conn = ctx.open_db()?;
        owner_for_token(&conn, &token_hash)?
    }; // Connection dropped before the handler runs

    let owner = owner.ok_or(ApiError::Unauthorized)?;
    if owner.expires_at < Utc::now() {
        return Err(ApiError::TokenExpired);
    }

    req.extensions_mut().insert(AuthedUser {
        user_id: owner.user_id,
    });

    Ok(next.run(req).await)
}
