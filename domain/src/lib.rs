//! Domain layer for consensus
//!
//! This crate contains the debate engine's core data model and pure logic.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Several models answer the same question, then spend further rounds
//! reading each other's positions and revising their own. The transcript of
//! every round feeds a final consensus report describing where the models
//! agree and diverge.
//!
//! ## Transcript-derived participation
//!
//! Which models are still debating is never tracked as separate state: the
//! session derives it from the recorded entries (two consecutive failed or
//! timed-out rounds drop a participant permanently).

pub mod consensus;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use consensus::{ConsensusAnalysis, analyze};
pub use crate::core::{
    error::DomainError,
    model::{ModelCatalog, ModelId, ModelProfile},
};
pub use debate::{
    ConsensusReport, DEFAULT_ROUNDS, DebateRequest, DebateSession, DebateStatus, ModelResponse,
    ProgressEvent, ResponseStatus,
};
pub use prompt::{Prompt, PromptBuilder, PromptTemplate};
