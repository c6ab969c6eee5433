//! Message validation.

/// Validation error for caller-supplied message fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Sender is empty.
    EmptySender,
    /// Recipient is empty.
    EmptyRecipient,
    /// Message ID is empty.
    EmptyMessageId,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptySender => "Sender is required",
            Self::EmptyRecipient => "Recipient is required",
            Self::EmptyMessageId => "Message ID is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptySender => "sender",
            Self::EmptyRecipient => "recipient",
            Self::EmptyMessageId => "id",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating message fields.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate the addressing of an outgoing message.
///
/// Both names are checked after trimming; every failing field is reported.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any field is empty.
pub fn validate_outgoing(sender: &str, recipient: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if sender.trim().is_empty() {
        errors.push(ValidationError::EmptySender);
    }
    if recipient.trim().is_empty() {
        errors.push(ValidationError::EmptyRecipient);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a recipient used as a listing key.
///
/// # Errors
///
/// Returns `ValidationError::EmptyRecipient` if the name is blank.
pub fn validate_recipient(recipient: &str) -> Result<(), ValidationError> {
    if recipient.trim().is_empty() {
        Err(ValidationError::EmptyRecipient)
    } else {
        Ok(())
    }
}

/// Validate a message ID before addressing the store with it.
///
/// # Errors
///
/// Returns `ValidationError::EmptyMessageId` if the ID is blank.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        Err(ValidationError::EmptyMessageId)
    } else {
        Ok(())
    }
}
