//! Final consensus report produced by the synthesizer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::model::ModelId;

/// Structured summary of where the models agreed and diverged
///
/// Created exactly once per debate, after the final round; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusReport {
    /// Free-text characterization of agreement and divergence
    pub summary: String,
    /// Themes shared across the compared responses, most prominent first
    #[serde(default)]
    pub common_themes: Vec<String>,
    /// Highest round number that contributed content to this report
    pub generated_from_round: u32,
    /// Models whose final responses were compared, in selection order
    #[serde(default)]
    pub models_compared: Vec<ModelId>,
    /// Character count of each compared response
    #[serde(default)]
    pub response_lengths: BTreeMap<ModelId, usize>,
}

impl ConsensusReport {
    /// Creates a report with its summary; analysis fields are added via builders.
    pub fn new(summary: impl Into<String>, generated_from_round: u32) -> Self {
        Self {
            summary: summary.into(),
            common_themes: Vec::new(),
            generated_from_round,
            models_compared: Vec::new(),
            response_lengths: BTreeMap::new(),
        }
    }

    /// Adds the shared themes.
    pub fn with_themes(mut self, themes: Vec<String>) -> Self {
        self.common_themes = themes;
        self
    }

    /// Records which models were compared.
    pub fn with_models_compared(mut self, models: Vec<ModelId>) -> Self {
        self.models_compared = models;
        self
    }

    /// Records per-model response sizes.
    pub fn with_response_lengths(mut self, lengths: BTreeMap<ModelId, usize>) -> Self {
        self.response_lengths = lengths;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builders() {
        let mut lengths = BTreeMap::new();
        lengths.insert(ModelId::new("claude"), 120);

        let report = ConsensusReport::new("Both models agree.", 2)
            .with_themes(vec!["memory".to_string(), "safety".to_string()])
            .with_models_compared(vec![ModelId::new("claude"), ModelId::new("gpt")])
            .with_response_lengths(lengths);

        assert_eq!(report.generated_from_round, 2);
        assert_eq!(report.common_themes.len(), 2);
        assert_eq!(report.models_compared.len(), 2);
        assert_eq!(report.response_lengths[&ModelId::new("claude")], 120);
    }

    #[test]
    fn test_report_serializes_lengths_as_map() {
        let mut lengths = BTreeMap::new();
        lengths.insert(ModelId::new("gpt"), 42);
        let report = ConsensusReport::new("s", 1).with_response_lengths(lengths);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["response_lengths"]["gpt"], 42);
    }
}
