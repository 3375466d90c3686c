//! folio-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for the other folio crates,
//! providing the content record model, a type-safe identifier, a unified
//! error type, and application configuration.

pub mod config;
pub mod content;
pub mod error;
pub mod ids;

// Re-export the most commonly used items at the crate root.
pub use content::{ContentDraft, ContentRecord, NewContent};
pub use error::{Error, Result};
pub use ids::ContentId;
