//! Document domain types shared by the quill editor crates
//!
//! This crate provides the canonical models for markdown documents:
//! - DocumentRecord: a stored document with ownership, favorite and trash state
//! - CreateDocumentInput / UpdateDocumentInput: request payloads for the store
//! - Validation: title rules shared by create, update and rename
//! - DocumentStats: word, character, line and reading-time counts

pub mod document;
pub mod stats;
pub mod validation;

pub use document::*;
pub use stats::*;
pub use validation::*;
