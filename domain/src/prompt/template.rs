//! Prompt templates for the debate flow

use serde::{Deserialize, Serialize};

/// A complete prompt for one adapter call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Role/behavior instruction for the model
    pub system: String,
    /// The message the model answers
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the opening round
    pub fn opening_system() -> &'static str {
        r#"You are participating in a multi-AI debate.
Give your honest, well-reasoned response to the question.
Be concise but thorough. Structure your response clearly."#
    }

    /// User prompt for the opening round
    pub fn opening_query(question: &str, context: &str) -> String {
        let mut prompt = String::new();
        if !context.trim().is_empty() {
            prompt.push_str(&format!("Context: {}\n\n", context));
        }
        prompt.push_str(&format!(
            "Question: {}\n\nPlease provide your analysis and answer.",
            question
        ));
        prompt
    }

    /// System prompt for revision rounds
    pub fn revision_system() -> &'static str {
        r#"You are participating in a multi-AI debate.
You've seen other AI models' responses. Now:
1. Note where you agree or disagree
2. Critique any flawed reasoning you see
3. Revise your position if warranted, or defend it if you stand by it
Be direct and substantive. Don't be sycophantic."#
    }

    /// User prompt for revision rounds
    ///
    /// `others` pairs each peer's display name with its previous-round
    /// accepted response, in selection order. `own_previous` is the model's
    /// own last accepted response; the block is omitted when it has none.
    pub fn revision_query(
        question: &str,
        context: &str,
        own_previous: Option<&str>,
        others: &[(String, String)],
    ) -> String {
        let mut prompt = String::new();
        if !context.trim().is_empty() {
            prompt.push_str(&format!("Context: {}\n\n", context));
        }
        prompt.push_str(&format!("Question: {}\n\n", question));

        if let Some(own) = own_previous {
            prompt.push_str(&format!("Your previous response: {}\n\n", own));
        }

        if others.is_empty() {
            // Every peer failed the previous round; there is nothing to quote.
            prompt.push_str(
                "No other model produced a response last round. \
                 Refine your position or defend it as it stands.",
            );
            return prompt;
        }

        prompt.push_str("Other models' responses:\n");
        for (name, content) in others {
            prompt.push_str(&format!("**{}**: {}\n", name, content));
        }

        prompt.push_str(
            "\nPlease critique the other responses and revise your position if needed. \
             What do you agree on? Where do you disagree?",
        );
        prompt
    }

    /// System prompt for consensus synthesis
    pub fn synthesis_system() -> &'static str {
        "You are a neutral analyst summarizing a debate between AI models. \
         Be objective and balanced."
    }

    /// User prompt for consensus synthesis
    pub fn synthesis_query(question: &str, finals: &[(String, String)]) -> String {
        let mut prompt = format!(
            "Analyze these AI responses to the question: \"{}\"\n\n",
            question
        );

        for (name, content) in finals {
            prompt.push_str(&format!("**{}**: {}\n\n", name, content));
        }

        prompt.push_str(
            r#"
Provide a brief consensus summary:
1. **Areas of Agreement**: What do the models agree on?
2. **Areas of Disagreement**: Where do they differ?
3. **Key Insights**: What are the most valuable takeaways?

Be concise and specific."#,
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_query_with_context() {
        let prompt = PromptTemplate::opening_query("What is Rust?", "A language debate.");
        assert!(prompt.starts_with("Context: A language debate."));
        assert!(prompt.contains("Question: What is Rust?"));
        assert!(prompt.ends_with("Please provide your analysis and answer."));
    }

    #[test]
    fn test_opening_query_omits_empty_context() {
        let prompt = PromptTemplate::opening_query("What is Rust?", "  ");
        assert!(!prompt.contains("Context:"));
        assert!(prompt.starts_with("Question: What is Rust?"));
    }

    #[test]
    fn test_revision_query_format() {
        let others = vec![
            ("Claude".to_string(), "Rust is safe.".to_string()),
            ("GPT-4o".to_string(), "Rust is fast.".to_string()),
        ];
        let prompt =
            PromptTemplate::revision_query("What is Rust?", "", Some("My old take."), &others);

        assert!(prompt.contains("Your previous response: My old take."));
        assert!(prompt.contains("**Claude**: Rust is safe."));
        assert!(prompt.contains("**GPT-4o**: Rust is fast."));
        assert!(prompt.contains("Where do you disagree?"));
    }

    #[test]
    fn test_revision_query_without_own_previous() {
        let others = vec![("Claude".to_string(), "Rust is safe.".to_string())];
        let prompt = PromptTemplate::revision_query("What is Rust?", "", None, &others);
        assert!(!prompt.contains("Your previous response"));
    }

    #[test]
    fn test_revision_query_with_no_peers() {
        let prompt =
            PromptTemplate::revision_query("What is Rust?", "", Some("My old take."), &[]);

        assert!(prompt.contains("Question: What is Rust?"));
        assert!(prompt.contains("Your previous response: My old take."));
        assert!(!prompt.contains("Other models' responses:"));
        assert!(prompt.contains("Refine your position"));
    }

    #[test]
    fn test_synthesis_query_format() {
        let finals = vec![
            ("Claude".to_string(), "Memory safety matters.".to_string()),
            ("Gemini".to_string(), "Performance matters.".to_string()),
        ];
        let prompt = PromptTemplate::synthesis_query("What is Rust?", &finals);

        assert!(prompt.contains("\"What is Rust?\""));
        assert!(prompt.contains("**Claude**: Memory safety matters."));
        assert!(prompt.contains("Areas of Agreement"));
        assert!(prompt.contains("Key Insights"));
    }
}
