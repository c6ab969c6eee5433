//! Message model, validation and record mapping.

pub mod format;
mod model;
pub mod projection;
mod validation;

pub use format::{format_timestamp, humanize};
pub use model::{
    EMPTY_MESSAGE_PLACEHOLDER, EditOutcome, MISSING_TEXT, Message, MessageId, MessageState,
    OutgoingMessage, StoredMessage, UNKNOWN_RECIPIENT, UNKNOWN_SENDER, UNKNOWN_TIMESTAMP,
};
pub use validation::{
    ValidationError, ValidationResult, validate_id, validate_outgoing, validate_recipient,
};
