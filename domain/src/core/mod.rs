//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`] — identifier of a debate participant
//! - [`model::ModelCatalog`] — display metadata for participants
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
