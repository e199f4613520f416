//! Prediction endpoints.
//!
//! - `POST /api/prediction` — run the full pipeline for the caller's form
//! - `GET  /api/prediction/history` — the caller's entries, newest first
//! - `GET  /api/prediction/schema` — model service schema, proxied verbatim

use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthedUser};
use crate::db::repository::history::history_for_user;
use crate::models::{AdviceRecord, PredictionHistoryEntry, RawPredictionForm};
use crate::pipeline::run_prediction;

#[derive(Deserialize)]
pub struct PredictRequest {
    pub features: RawPredictionForm,
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<serde_json::Value>,
    pub advice: AdviceRecord,
    pub history_id: Uuid,
}

/// `POST /api/prediction` — score the submitted form and persist the outcome.
pub async fn predict(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthedUser>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let outcome =
        run_prediction(&ctx.db_path, ctx.scorer.as_ref(), user.user_id, &req.features).await?;

    Ok(Json(PredictResponse {
        prediction: outcome.prediction,
        confidence: outcome.confidence,
        explanation: outcome.explanation,
        advice: outcome.advice,
        history_id: outcome.entry_id,
    }))
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<PredictionHistoryEntry>,
}

/// `GET /api/prediction/history` — the authenticated user's predictions.
pub async fn history(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<AuthedUser>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let entries = history_for_user(&conn, user.user_id)?;
    Ok(Json(HistoryResponse { entries }))
}

/// `GET /api/prediction/schema` — feature schema from the model service.
pub async fn schema(
    State(ctx): State<ApiContext>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let schema = ctx.scorer.schema().await?;
    Ok(Json(schema))
}
