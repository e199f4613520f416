//! Form-to-feature encoding.
//!
//! Maps a [`FormSnapshot`] into the fixed-shape record the external model
//! was trained against: demographic fields renamed to the model vocabulary
//! plus one binary flag per canonical symptom name. The encoder never
//! fails and never validates ranges; malformed input degrades to absent
//! or zero-valued features.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize::normalize_symptom;
use crate::models::FormSnapshot;

/// The ordered set of canonical symptom names the model expects.
/// Every [`FeatureRecord`] carries exactly these flags.
pub const SYMPTOM_VOCABULARY: &[&str] = &[
    "Back Pain",
    "Bleeding Gums",
    "Blurred Vision",
    "Body Ache",
    "Chest Pain",
    "Cold Hands",
    "Cough",
    "Dizziness",
    "Fatigue",
    "Fever",
    "Frequent Urination",
    "Headache",
    "High Fever",
    "Increased Thirst",
    "Irregular Heartbeat",
    "Itching",
    "Joint Pain",
    "Loss of Smell",
    "Nausea",
    "Pale Skin",
    "Rash",
    "Shortness of Breath",
    "Slow Healing",
    "Sore Throat",
    "Sweating",
    "Swelling",
    "Weakness",
    "Weight Loss",
];

/// Symptom tokens are separated by commas, semicolons, or newlines.
static TOKEN_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\r\n]+").expect("token separator regex"));

/// The exact record shape the scoring service consumes: demographics under
/// the model's field names, then one 0/1 flag per vocabulary entry.
///
/// `symptoms` is a `BTreeMap` so the serialized key order is stable across
/// requests (and equals the alphabetical vocabulary order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Age")]
    pub age: Option<i64>,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "SmokingHistory")]
    pub smoking_history: String,
    #[serde(rename = "DietType")]
    pub diet_type: String,
    #[serde(rename = "ExerciseFrequency")]
    pub exercise_frequency: String,
    #[serde(flatten)]
    pub symptoms: BTreeMap<String, u8>,
}

impl FeatureRecord {
    /// Flag value for a vocabulary entry, by canonical name.
    pub fn flag(&self, name: &str) -> Option<u8> {
        self.symptoms.get(name).copied()
    }
}

/// Encode a form snapshot into the model's feature shape.
/// Total function: any snapshot yields a complete record.
pub fn encode(form: &FormSnapshot) -> FeatureRecord {
    let entered: HashSet<String> = TOKEN_SEPARATORS
        .split(&form.symptoms_text)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(normalize_symptom)
        .collect();

    let symptoms = SYMPTOM_VOCABULARY
        .iter()
        .map(|name| {
            let hit = entered.contains(&normalize_symptom(name));
            (name.to_string(), u8::from(hit))
        })
        .collect();

    FeatureRecord {
        age: form.age,
        sex: form.sex.clone(),
        smoking_history: form.smoking_history.clone(),
        diet_type: form.diet_type.clone(),
        exercise_frequency: form.physical_activity.clone(),
        symptoms,
    }
}
