use serde::{Deserialize, Serialize};

/// Structured guidance attached to a predicted condition.
///
/// Serialized shape matches the stored history documents:
/// `short`, `avoid`, `do`, `prevention`, `nutrition`, `urgent`, `notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRecord {
    pub short: String,
    #[serde(default)]
    pub avoid: Vec<String>,
    #[serde(rename = "do", default)]
    pub do_actions: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default)]
    pub nutrition: NutritionAdvice,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub notes: String,
}

/// Dietary guidance split into recommended and avoid lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionAdvice {
    #[serde(default)]
    pub recommended: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}
