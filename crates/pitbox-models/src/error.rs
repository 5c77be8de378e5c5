//! Error types for the `pitbox-models` crate.
//!
//! All fallible constructors in this crate return variants of [`ModelError`].

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A user message was empty or contained only whitespace.
    #[error("message must not be blank")]
    BlankMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_blank_message() {
        assert_eq!(
            ModelError::BlankMessage.to_string(),
            "message must not be blank"
        );
    }
}
