use super::super::blueprint::Questionnaire;
use super::super::domain::{
    NO_MISSING_NOT_COMPLIANT, PARTIALLY_IN_PROGRESS, SELECT_NONE, YES_GOOD_COMPLETE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_OPTION_SCORES: [(&str, u8); 3] = [
    (YES_GOOD_COMPLETE, 100),
    (PARTIALLY_IN_PROGRESS, 50),
    (NO_MISSING_NOT_COMPLIANT, 0),
];

pub const MAX_OPTION_SCORE: u8 = 100;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Option label to score table used for single-choice questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionScores(BTreeMap<String, u8>);

impl OptionScores {
    pub fn standard() -> Self {
        DEFAULT_OPTION_SCORES.into_iter().collect()
    }

    pub fn get(&self, label: &str) -> Option<u8> {
        self.0.get(label).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(label, score)| (label.as_str(), *score))
    }
}

/// Built-in table, constructed on first use and shared afterwards.
pub(crate) fn standard_option_scores() -> &'static OptionScores {
    static TABLE: OnceLock<OptionScores> = OnceLock::new();
    TABLE.get_or_init(OptionScores::standard)
}

impl Default for OptionScores {
    fn default() -> Self {
        Self::standard()
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for OptionScores {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, score)| (label.into(), score))
                .collect(),
        )
    }
}

/// Category name to weight table. Weights are expected to sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryWeights(BTreeMap<String, f64>);

impl CategoryWeights {
    pub fn from_questionnaire(questionnaire: &Questionnaire) -> Self {
        questionnaire
            .categories()
            .iter()
            .map(|category| (category.name, category.weight))
            .collect()
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0.get(category).copied()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::from_questionnaire(&Questionnaire::standard())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for CategoryWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, weight)| (name.into(), weight))
                .collect(),
        )
    }
}

/// The adjustable scoring tables, loaded once at startup and passed
/// explicitly to every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub category_weights: CategoryWeights,
    pub option_scores: OptionScores,
    pub select_sentinel: String,
}

impl ScoringConfig {
    pub fn standard() -> Self {
        Self {
            category_weights: CategoryWeights::default(),
            option_scores: OptionScores::standard(),
            select_sentinel: SELECT_NONE.to_string(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ScoringConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ScoringConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if let Some((label, score)) = self
            .option_scores
            .iter()
            .find(|(_, score)| *score > MAX_OPTION_SCORE)
        {
            return Err(ScoringConfigError::ScoreOutOfRange {
                label: label.to_string(),
                score,
            });
        }

        if let Some((category, weight)) = self
            .category_weights
            .iter()
            .find(|(_, weight)| !weight.is_finite() || !(0.0..=1.0).contains(weight))
        {
            return Err(ScoringConfigError::WeightOutOfRange {
                category: category.to_string(),
                weight,
            });
        }

        Ok(())
    }

    /// Signed distance of the weight total from 1.0. Scores are never
    /// normalized; callers decide whether drift matters.
    pub fn weight_drift(&self) -> f64 {
        let drift = self.category_weights.total() - 1.0;
        if drift.abs() < WEIGHT_TOLERANCE {
            0.0
        } else {
            drift
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("failed to read scoring config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scoring config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("option '{label}' scores {score}, above the maximum of 100")]
    ScoreOutOfRange { label: String, score: u8 },
    #[error("category '{category}' has weight {weight}, expected a fraction between 0 and 1")]
    WeightOutOfRange { category: String, weight: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_balanced() {
        let config = ScoringConfig::standard();
        assert_eq!(config.weight_drift(), 0.0);
        assert_eq!(config.category_weights.get("Accounting & Finance"), Some(0.20));
        assert_eq!(config.option_scores.get(PARTIALLY_IN_PROGRESS), Some(50));
        assert_eq!(config.select_sentinel, "None");
    }

    #[test]
    fn partial_json_falls_back_to_standard_tables() {
        let config = ScoringConfig::from_json(r#"{"option_scores": {"Yes": 90, "No": 10}}"#)
            .expect("config parses");

        assert_eq!(config.option_scores.get("Yes"), Some(90));
        assert_eq!(config.option_scores.get(YES_GOOD_COMPLETE), None);
        assert_eq!(config.category_weights, CategoryWeights::default());
    }

    #[test]
    fn drift_is_reported_without_normalizing() {
        let config = ScoringConfig::from_json(r#"{"category_weights": {"A": 0.5, "B": 0.3}}"#)
            .expect("config parses");

        assert!((config.weight_drift() + 0.2).abs() < 1e-9);
        assert_eq!(config.category_weights.get("A"), Some(0.5));
    }

    #[test]
    fn rejects_scores_above_one_hundred() {
        let error = ScoringConfig::from_json(r#"{"option_scores": {"Excellent": 120}}"#)
            .expect_err("score above range");

        match error {
            ScoringConfigError::ScoreOutOfRange { label, score } => {
                assert_eq!(label, "Excellent");
                assert_eq!(score, 120);
            }
            other => panic!("expected score range error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_weights_outside_unit_interval() {
        let error = ScoringConfig::from_json(r#"{"category_weights": {"A": 1.5}}"#)
            .expect_err("weight above range");
        assert!(matches!(error, ScoringConfigError::WeightOutOfRange { .. }));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let error = ScoringConfig::from_path("./does-not-exist.json").expect_err("missing file");
        assert!(matches!(error, ScoringConfigError::Read { .. }));
    }
}
