//! Consensus domain
//!
//! Deterministic comparison of the models' final positions. The word-overlap
//! heuristic here always runs; a moderator-written summary can be layered on
//! top of it by the application layer.

pub mod analysis;

pub use analysis::{ConsensusAnalysis, analyze};
