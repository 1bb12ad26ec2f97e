//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod round_scheduler;
pub mod run_debate;
pub mod synthesize;
