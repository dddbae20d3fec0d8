//! Error types for quill-core

use quill_domain::ValidationError;
use thiserror::Error;

pub use crate::action::UnknownAction;
pub use crate::config::ConfigError;
pub use crate::export::ExportError;
pub use crate::store::StoreError;

/// Result type alias for quill operations
pub type Result<T> = std::result::Result<T, QuillError>;

/// Main error type for quill operations
///
/// The transform engine and history never fail; these errors come from the
/// collaborators around them (store, export, configuration).
#[derive(Error, Debug)]
pub enum QuillError {
    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Rejected document payload
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// An action identifier outside the toolbar set
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    /// The session has no backing document to save into
    #[error("Session is not attached to a stored document")]
    Detached,
}
