//! Prompt domain
//!
//! Templates and pure construction of the prompt each model receives at
//! every stage of a debate.

mod builder;
mod template;

pub use builder::PromptBuilder;
pub use template::{Prompt, PromptTemplate};
