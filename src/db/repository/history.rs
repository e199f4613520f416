use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::user::{parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{AdviceRecord, FormSnapshot, PredictionHistoryEntry};
use crate::pipeline::encoder::FeatureRecord;
use crate::scoring::ScoreResponse;

/// Persist one prediction outcome. Generates the entry id and creation
/// timestamp; the insert is atomic — it either lands fully or not at all.
pub fn insert_history(
    conn: &Connection,
    user_id: Uuid,
    form: &FormSnapshot,
    features: &FeatureRecord,
    score: &ScoreResponse,
    advice: &AdviceRecord,
) -> Result<PredictionHistoryEntry, DatabaseError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    conn.execute(
        "INSERT INTO prediction_history
         (id, user_id, form_json, features_json, prediction, confidence, explanation_json, advice_json, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            id.to_string(),
            user_id.to_string(),
            to_json(form)?,
            to_json(features)?,
            score.prediction,
            score.confidence,
            score.explanation.as_ref().map(to_json).transpose()?,
            to_json(advice)?,
            created_at.to_rfc3339(),
        ],
    )?;

    Ok(PredictionHistoryEntry {
        id,
        user_id,
        form: form.clone(),
        features: features.clone(),
        prediction: score.prediction.clone(),
        confidence: score.confidence,
        explanation: score.explanation.clone(),
        advice: advice.clone(),
        created_at,
    })
}

/// All history entries owned by one user, newest first.
pub fn history_for_user(
    conn: &Connection,
    user_id: Uuid,
) -> Result<Vec<PredictionHistoryEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, form_json, features_json, prediction, confidence,
         explanation_json, advice_json, created_at
         FROM prediction_history
         WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, f64>(5)?,
            row.get::<_, Option<String>>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, owner, form, features, prediction, confidence, explanation, advice, created) =
            row?;
        entries.push(PredictionHistoryEntry {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&owner)?,
            form: from_json(&form)?,
            features: from_json(&features)?,
            prediction,
            confidence,
            explanation: explanation.as_deref().map(from_json).transpose()?,
            advice: from_json(&advice)?,
            created_at: parse_timestamp(&created)?,
        });
    }
    Ok(entries)
}

pub fn history_count(conn: &Connection, user_id: Uuid) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM prediction_history WHERE user_id = ?1",
        params![user_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::CorruptDocument(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::CorruptDocument(e.to_string()))
}
