//! User profile endpoints.
//!
//! Profile fields live on the user record, independent of prediction
//! history; updates are partial and touch only the submitted fields.

use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthedUser};
use crate::db::repository::user::{profile_by_id, update_profile};
use crate::models::{ProfileUpdate, UserProfile};

/// `GET /api/user/profile` — the authenticated user's profile.
pub async fn get(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthedUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let conn = ctx.open_db()?;
    let profile = profile_by_id(&conn, user.user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(profile))
}

#[derive(Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub user: UserProfile,
}

/// `PUT /api/user/profile` — partial profile update.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthedUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let profile = update_profile(&conn, user.user_id, &update)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UpdateResponse {
        message: "Profile updated successfully".into(),
        user: profile,
    }))
}
