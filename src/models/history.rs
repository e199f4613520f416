use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::advice::AdviceRecord;
use crate::pipeline::encoder::FeatureRecord;

/// Raw prediction form as submitted by the frontend. Every field is
/// optional on the wire; age may arrive as a number or a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPredictionForm {
    #[serde(default)]
    pub age: Option<serde_json::Value>,
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub diet_type: String,
    #[serde(default)]
    pub smoking_history: String,
    #[serde(default)]
    pub physical_activity: String,
    #[serde(default)]
    pub symptoms: String,
}

/// Human-readable record of exactly what the user submitted.
/// Written once per prediction request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub age: Option<i64>,
    pub sex: String,
    pub diet_type: String,
    pub smoking_history: String,
    pub physical_activity: String,
    pub symptoms_text: String,
}

impl FormSnapshot {
    /// Build a snapshot from the raw form. Unparseable fields degrade to
    /// their empty defaults; demographic values are not validated here.
    pub fn from_raw(raw: &RawPredictionForm) -> Self {
        Self {
            age: raw.age.as_ref().and_then(parse_age),
            sex: raw.sex.clone(),
            diet_type: raw.diet_type.clone(),
            smoking_history: raw.smoking_history.clone(),
            physical_activity: raw.physical_activity.clone(),
            symptoms_text: raw.symptoms.trim().to_string(),
        }
    }
}

/// Parse an age value that may arrive as a JSON number or string.
/// Anything unparseable is absent, not zero and not an error.
fn parse_age(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

/// Durable, immutable record of one prediction request and its outcome.
/// Owned by exactly one user; queried newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionHistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub form: FormSnapshot,
    pub features: FeatureRecord,
    pub prediction: String,
    pub confidence: f64,
    pub explanation: Option<serde_json::Value>,
    pub advice: AdviceRecord,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_keeps_exact_user_input() {
        let raw = RawPredictionForm {
            age: Some(json!(34)),
            sex: "Female".into(),
            diet_type: "Vegan".into(),
            smoking_history: "Never".into(),
            physical_activity: "Moderate".into(),
            symptoms: "  Fever, Cough  ".into(),
        };
        let snap = FormSnapshot::from_raw(&raw);
        assert_eq!(snap.age, Some(34));
        assert_eq!(snap.sex, "Female");
        assert_eq!(snap.symptoms_text, "Fever, Cough");
    }

    #[test]
    fn age_from_numeric_string() {
        assert_eq!(parse_age(&json!("42")), Some(42));
        assert_eq!(parse_age(&json!(" 42 ")), Some(42));
    }

    #[test]
    fn empty_age_string_is_absent_not_zero() {
        assert_eq!(parse_age(&json!("")), None);
        assert_eq!(parse_age(&json!("   ")), None);
    }

    #[test]
    fn garbage_age_is_absent() {
        assert_eq!(parse_age(&json!("forty")), None);
        assert_eq!(parse_age(&json!(true)), None);
        assert_eq!(parse_age(&json!(null)), None);
    }

    #[test]
    fn age_zero_is_kept() {
        assert_eq!(parse_age(&json!(0)), Some(0));
        assert_eq!(parse_age(&json!("0")), Some(0));
    }

    #[test]
    fn unrecognized_demographics_pass_through() {
        let raw = RawPredictionForm {
            sex: "Attack Helicopter".into(),
            ..Default::default()
        };
        let snap = FormSnapshot::from_raw(&raw);
        assert_eq!(snap.sex, "Attack Helicopter");
    }
}
