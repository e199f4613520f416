//! Canonical symptom comparison keys.
//!
//! User-entered tokens and vocabulary entries go through the same
//! normalization before comparison, so "weight-loss", "Weight_Loss" and
//! "weight loss" all land on the same key.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of whitespace, hyphens and underscores collapse to one space.
static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_\-]+").expect("separator regex"));

/// Produce the canonical comparison key for a symptom name: lower-case,
/// separator runs collapsed to single spaces, trimmed. Pure and idempotent.
pub fn normalize_symptom(raw: &str) -> String {
    SEPARATOR_RUNS
        .replace_all(raw, " ")
        .trim()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_collapse_to_one_key() {
        for variant in ["Weight Loss", "weight-loss", "Weight_Loss", "weight   loss", " WEIGHT-LOSS "] {
            assert_eq!(normalize_symptom(variant), "weight loss", "{variant:?}");
        }
    }

    #[test]
    fn idempotent_on_normalized_input() {
        let once = normalize_symptom("Shortness---of___Breath");
        assert_eq!(once, "shortness of breath");
        assert_eq!(normalize_symptom(&once), once);
    }

    #[test]
    fn mixed_separator_runs_collapse() {
        assert_eq!(normalize_symptom("joint _- pain"), "joint pain");
    }

    #[test]
    fn empty_and_separator_only_input() {
        assert_eq!(normalize_symptom(""), "");
        assert_eq!(normalize_symptom("  -_- "), "");
    }

    #[test]
    fn plain_words_untouched_except_case() {
        assert_eq!(normalize_symptom("Fever"), "fever");
    }
}
