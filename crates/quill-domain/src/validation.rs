//! Validation for document payloads

use crate::{CreateDocumentInput, UpdateDocumentInput};
use thiserror::Error;

/// Longest title accepted, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// A rejected document payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must not exceed {max} characters (got {actual})")]
    TitleTooLong { max: usize, actual: usize },
}

/// Validate a document title.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let chars = title.chars().count();
    if chars == 0 {
        return Err(ValidationError::TitleRequired);
    }
    if chars > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong {
            max: MAX_TITLE_CHARS,
            actual: chars,
        });
    }
    Ok(())
}

/// Validate a create payload.
pub fn validate_create(input: &CreateDocumentInput) -> Result<(), ValidationError> {
    validate_title(&input.title)
}

/// Validate an update payload. Only a present title is checked.
pub fn validate_update(input: &UpdateDocumentInput) -> Result<(), ValidationError> {
    match &input.title {
        Some(title) => validate_title(title),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_rejected() {
        assert_eq!(validate_title(""), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_title_length_boundary() {
        let ok = "a".repeat(MAX_TITLE_CHARS);
        assert!(validate_title(&ok).is_ok());

        let long = "a".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(
            validate_title(&long),
            Err(ValidationError::TitleTooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_CHARS);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn test_update_without_title_passes() {
        assert!(validate_update(&UpdateDocumentInput::content("")).is_ok());
        assert!(validate_update(&UpdateDocumentInput::title("")).is_err());
    }
}
