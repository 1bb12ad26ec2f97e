//! Word-overlap analysis of the final debate positions.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::model::ModelId;
use crate::debate::response::ModelResponse;

/// Words excluded from theme extraction
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "of", "to", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through",
    "during", "before", "after", "above", "below", "between", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how", "all", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
    "than", "too", "very", "just", "and", "but", "if", "or", "because", "until", "while",
    "although", "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
    "what", "which", "who", "whom", "its", "his", "her", "their", "our", "your", "my", "-",
    "–", "—", ".", ",", ":", ";", "!", "?",
];

/// Maximum number of themes reported
const MAX_THEMES: usize = 10;

/// Result of comparing the models' final positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusAnalysis {
    /// Models whose content went into the comparison, in input order
    pub models_compared: Vec<ModelId>,
    /// Words shared by every compared response, most frequent first
    pub common_themes: Vec<String>,
    /// Character count per compared response
    pub response_lengths: BTreeMap<ModelId, usize>,
}

impl ConsensusAnalysis {
    /// Deterministic summary text used when no moderator summary exists
    pub fn fallback_summary(&self, question: &str) -> String {
        match self.models_compared.len() {
            0 => format!("No usable positions were produced for \"{}\".", question),
            1 => format!(
                "Only {} produced a usable final position on \"{}\"; no cross-model comparison was possible.",
                self.models_compared[0], question
            ),
            n if self.common_themes.is_empty() => format!(
                "Compared {} final positions on \"{}\". No shared themes emerged; the positions diverge.",
                n, question
            ),
            n => format!(
                "Compared {} final positions on \"{}\". Shared themes: {}.",
                n,
                question,
                self.common_themes.join(", ")
            ),
        }
    }
}

/// Compare final responses by word overlap
///
/// Themes are the lowercased words present in every compared response,
/// minus stop words and anything three characters or shorter, ranked by
/// total occurrence count (ties broken lexicographically) and capped at
/// ten. With fewer than two responses there is nothing to intersect and
/// the theme list is empty.
pub fn analyze(responses: &[&ModelResponse]) -> ConsensusAnalysis {
    let models_compared: Vec<ModelId> = responses.iter().map(|r| r.model.clone()).collect();

    let response_lengths: BTreeMap<ModelId, usize> = responses
        .iter()
        .map(|r| (r.model.clone(), r.content.chars().count()))
        .collect();

    let tokenized: Vec<Vec<String>> = responses
        .iter()
        .map(|r| {
            r.content
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .collect();

    let common_themes = if tokenized.len() > 1 {
        let mut shared: HashSet<&str> = tokenized[0].iter().map(String::as_str).collect();
        for words in &tokenized[1..] {
            let set: HashSet<&str> = words.iter().map(String::as_str).collect();
            shared.retain(|w| set.contains(w));
        }
        shared.retain(|w| !STOP_WORDS.contains(w) && w.chars().count() > 3);

        let mut ranked: Vec<(String, usize)> = shared
            .iter()
            .map(|w| {
                let count = tokenized
                    .iter()
                    .flat_map(|words| words.iter())
                    .filter(|word| word.as_str() == *w)
                    .count();
                (w.to_string(), count)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(MAX_THEMES)
            .map(|(word, _)| word)
            .collect()
    } else {
        Vec::new()
    };

    ConsensusAnalysis {
        models_compared,
        common_themes,
        response_lengths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(model: &str, content: &str) -> ModelResponse {
        ModelResponse::ok(ModelId::new(model), 1, content)
    }

    #[test]
    fn test_common_themes_are_shared_words() {
        let a = response("claude", "Memory safety through ownership makes Rust reliable.");
        let b = response("gpt", "Rust guarantees memory safety without garbage collection.");
        let analysis = analyze(&[&a, &b]);

        assert!(analysis.common_themes.contains(&"memory".to_string()));
        assert!(analysis.common_themes.contains(&"safety".to_string()));
        // "through" appears in only one response
        assert!(!analysis.common_themes.contains(&"through".to_string()));
    }

    #[test]
    fn test_stop_words_and_short_words_excluded() {
        let a = response("claude", "the and with api rust tooling");
        let b = response("gpt", "the and with api rust tooling");
        let analysis = analyze(&[&a, &b]);

        assert!(!analysis.common_themes.contains(&"the".to_string()));
        assert!(!analysis.common_themes.contains(&"and".to_string()));
        assert!(!analysis.common_themes.contains(&"with".to_string()));
        // three characters or shorter is filtered; four is kept
        assert!(!analysis.common_themes.contains(&"api".to_string()));
        assert!(analysis.common_themes.contains(&"rust".to_string()));
        assert!(analysis.common_themes.contains(&"tooling".to_string()));
    }

    #[test]
    fn test_themes_ranked_by_frequency_then_alphabetical() {
        let a = response("claude", "borrowing borrowing borrowing lifetimes aliasing");
        let b = response("gpt", "borrowing lifetimes aliasing");
        let analysis = analyze(&[&a, &b]);

        assert_eq!(
            analysis.common_themes,
            vec![
                "borrowing".to_string(),
                "aliasing".to_string(),
                "lifetimes".to_string()
            ]
        );
    }

    #[test]
    fn test_theme_count_capped_at_ten() {
        let text = "alpha1n bravo2n charlie3 delta45 echo567 foxtrot8 golf9abc hotel1bc \
                    india2cd juliet34 kilo5678 lima9abc";
        let a = response("claude", text);
        let b = response("gpt", text);
        let analysis = analyze(&[&a, &b]);

        assert_eq!(analysis.common_themes.len(), 10);
    }

    #[test]
    fn test_single_response_has_no_themes() {
        let a = response("claude", "ownership borrowing lifetimes");
        let analysis = analyze(&[&a]);

        assert!(analysis.common_themes.is_empty());
        assert_eq!(analysis.models_compared.len(), 1);
    }

    #[test]
    fn test_response_lengths_recorded() {
        let a = response("claude", "12345");
        let b = response("gpt", "1234567");
        let analysis = analyze(&[&a, &b]);

        assert_eq!(analysis.response_lengths[&ModelId::new("claude")], 5);
        assert_eq!(analysis.response_lengths[&ModelId::new("gpt")], 7);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let a = response("claude", "ownership borrowing lifetimes aliasing traits generics");
        let b = response("gpt", "generics traits aliasing lifetimes borrowing ownership");
        let first = analyze(&[&a, &b]);
        let second = analyze(&[&a, &b]);

        assert_eq!(first.common_themes, second.common_themes);
    }

    #[test]
    fn test_fallback_summary_variants() {
        let a = response("claude", "ownership ownership matters");
        let b = response("gpt", "ownership matters here");
        let analysis = analyze(&[&a, &b]);
        let summary = analysis.fallback_summary("What is Rust?");
        assert!(summary.contains("2 final positions"));
        assert!(summary.contains("ownership"));

        let single = analyze(&[&a]);
        let summary = single.fallback_summary("What is Rust?");
        assert!(summary.contains("Only claude"));

        let empty = analyze(&[]);
        let summary = empty.fallback_summary("What is Rust?");
        assert!(summary.contains("No usable positions"));
    }
}
