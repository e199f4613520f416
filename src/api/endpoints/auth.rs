//! Account registration and login.
//!
//! Registration stores PBKDF2-hashed credentials; login verifies them
//! and issues an opaque bearer token whose hash is kept in the
//! sessions table.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth::{generate_salt, generate_token, hash_password, hash_token, verify_password};
use crate::config::SESSION_TTL_DAYS;
use crate::db::repository::session::insert_session;
use crate::db::repository::user::{credentials_by_email, email_exists, insert_user, NewUser};
use crate::models::UserProfile;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
}

/// `POST /api/auth/register` — create a new account.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Name, email, and password are required".into(),
        ));
    }

    {
        let conn = ctx.open_db()?;
        if email_exists(&conn, &email)? {
            return Err(ApiError::BadRequest(
                "User already exists with this email".into(),
            ));
        }
    }

    // Key derivation is CPU-bound; keep it off the async workers.
    let salt = generate_salt();
    let password = req.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, &salt))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let conn = ctx.open_db()?;
    let user = insert_user(
        &conn,
        &NewUser {
            name: &name,
            email: &email,
            phone: req.phone.trim(),
            password_hash,
            password_salt: salt,
        },
    )?;

    tracing::info!(user_id = %user.id, "registered new account");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user,
        }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

/// `POST /api/auth/login` — verify credentials and issue a session token.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".into()));
    }

    let creds = {
        let conn = ctx.open_db()?;
        credentials_by_email(&conn, &email)?
    }
    .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    let user_id = creds.user_id;

    let password = req.password.clone();
    let valid = tokio::task::spawn_blocking(move || {
        verify_password(&password, &creds.password_salt, &creds.password_hash)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    if !valid {
        return Err(ApiError::Unauthorized);
    }

    let token = generate_token();
    let conn = ctx.open_db()?;
    insert_session(&conn, user_id, &hash_token(&token), SESSION_TTL_DAYS)?;

    let user = crate::db::repository::user::profile_by_id(&conn, user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    tracing::info!(user_id = %user.id, "login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
        user,
    }))
}
