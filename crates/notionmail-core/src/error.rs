//! Error types for the core library.

use thiserror::Error;

use crate::message::ValidationError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied fields were rejected before any store call.
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    /// The referenced message does not exist.
    #[error("Message not found: {0}")]
    NotFound(String),

    /// Record store operation failed.
    #[error("Store error: {0}")]
    Store(#[source] notionmail_store::Error),

    /// Bulk delete stopped partway; earlier messages stay archived.
    #[error("Deleted {archived} messages before failing: {source}")]
    PartialDelete {
        /// Messages archived before the failure.
        archived: usize,
        /// The first failure encountered.
        source: Box<Self>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if this is a validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if the referenced message does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Self::Validation(vec![error])
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<notionmail_store::Error> for Error {
    fn from(error: notionmail_store::Error) -> Self {
        match error {
            notionmail_store::Error::NotFound(what) => Self::NotFound(what),
            other => Self::Store(other),
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
