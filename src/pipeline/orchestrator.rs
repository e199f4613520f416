//! Composes one prediction request end to end.
//!
//! The pipeline runs as a single sequential pass per request; the
//! scoring call is the only suspension point. The database connection
//! is opened only after scoring succeeds, so a failed scoring call can
//! never leave a partial history row behind.

use std::path::Path;

use uuid::Uuid;

use super::advice::resolve_advice;
use super::encoder::encode;
use super::PredictError;
use crate::db::repository::history::insert_history;
use crate::db::sqlite::open_database;
use crate::models::{AdviceRecord, FormSnapshot, RawPredictionForm};
use crate::scoring::ScoringClient;

/// Everything the caller gets back from one prediction request.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub entry_id: Uuid,
    pub prediction: String,
    pub confidence: f64,
    pub explanation: Option<serde_json::Value>,
    pub advice: AdviceRecord,
}

/// Run the full pipeline for one authenticated user and raw form:
/// snapshot → features → external score → advice → stored history entry.
pub async fn run_prediction(
    db_path: &Path,
    scorer: &dyn ScoringClient,
    user_id: Uuid,
    raw: &RawPredictionForm,
) -> Result<PredictionOutcome, PredictError> {
    let form = FormSnapshot::from_raw(raw);
    let features = encode(&form);

    tracing::debug!(%user_id, symptoms = %form.symptoms_text, "scoring prediction request");
    let score = scorer.score(&features).await?;
    tracing::info!(
        %user_id,
        prediction = %score.prediction,
        confidence = score.confidence,
        "model scored request"
    );

    let advice = resolve_advice(&score.prediction);

    let conn = open_database(db_path)?;
    let entry = insert_history(&conn, user_id, &form, &features, &score, advice)?;

    Ok(PredictionOutcome {
        entry_id: entry.id,
        prediction: entry.prediction,
        confidence: entry.confidence,
        explanation: entry.explanation,
        advice: entry.advice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::history::{history_count, history_for_user};
    use crate::db::repository::user::{insert_user, NewUser};
    use crate::scoring::{MockScoringClient, ScoreResponse};
    use serde_json::json;

    struct TestDb {
        _dir: tempfile::TempDir,
        path: std::path::PathBuf,
        user_id: Uuid,
    }

    fn test_db() -> TestDb {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symcheck.db");
        let conn = open_database(&path).unwrap();
        let user_id = insert_user(
            &conn,
            &NewUser {
                name: "Asha",
                email: "asha@example.com",
                phone: "",
                password_hash: [0u8; 32],
                password_salt: [0u8; 32],
            },
        )
        .unwrap()
        .id;
        TestDb { _dir: dir, path, user_id }
    }

    fn form(symptoms: &str) -> RawPredictionForm {
        RawPredictionForm {
            age: Some(json!(34)),
            sex: "Female".into(),
            diet_type: "Vegan".into(),
            smoking_history: "Never".into(),
            physical_activity: "Moderate".into(),
            symptoms: symptoms.into(),
        }
    }

    #[tokio::test]
    async fn successful_prediction_is_persisted_and_returned() {
        let db = test_db();
        let scorer = MockScoringClient::with_response(ScoreResponse {
            prediction: "Flu".into(),
            confidence: 0.91,
            explanation: Some(json!({"method": "shap"})),
        });

        let outcome = run_prediction(&db.path, &scorer, db.user_id, &form("Fever, Cough"))
            .await
            .unwrap();

        assert_eq!(outcome.prediction, "Flu");
        assert_eq!(outcome.confidence, 0.91);
        assert_eq!(outcome.explanation.as_ref().unwrap()["method"], "shap");
        assert!(outcome.advice.short.contains("flu"));

        let conn = open_database(&db.path).unwrap();
        let entries = history_for_user(&conn, db.user_id).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, outcome.entry_id);
        assert_eq!(entries[0].features.flag("Fever"), Some(1));
        assert_eq!(entries[0].features.flag("Cough"), Some(1));
        assert_eq!(entries[0].form.symptoms_text, "Fever, Cough");
    }

    #[tokio::test]
    async fn scoring_failure_leaves_no_history() {
        let db = test_db();
        let scorer = MockScoringClient::failing("model service down");

        let result = run_prediction(&db.path, &scorer, db.user_id, &form("Fever")).await;
        assert!(matches!(result, Err(PredictError::Scoring(_))));
        assert_eq!(scorer.call_count(), 1);

        let conn = open_database(&db.path).unwrap();
        assert_eq!(history_count(&conn, db.user_id).unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_label_gets_default_advice() {
        let db = test_db();
        let scorer = MockScoringClient::with_prediction("Xyzdisease", 0.42);

        let outcome = run_prediction(&db.path, &scorer, db.user_id, &form(""))
            .await
            .unwrap();

        assert_eq!(outcome.prediction, "Xyzdisease");
        assert_eq!(
            outcome.advice.short,
            "No specific guidance available for this condition."
        );
    }

    #[tokio::test]
    async fn snapshot_and_features_disagreeing_is_impossible() {
        // The stored features always derive from the stored snapshot.
        let db = test_db();
        let scorer = MockScoringClient::with_prediction("Flu", 0.8);

        run_prediction(&db.path, &scorer, db.user_id, &form("weight_loss"))
            .await
            .unwrap();

        let conn = open_database(&db.path).unwrap();
        let entry = &history_for_user(&conn, db.user_id).unwrap()[0];
        assert_eq!(entry.form.symptoms_text, "weight_loss");
        assert_eq!(entry.features.flag("Weight Loss"), Some(1));
    }
}
