//! Message data models.

use notionmail_store::RecordId;

/// Identifier of a message; the ID of its backing record.
pub type MessageId = RecordId;

/// Text stored when a message is sent with an empty body.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "Empty message";

/// Shown when a record has no sender.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Shown when a record has no recipient.
pub const UNKNOWN_RECIPIENT: &str = "Unknown";

/// Shown when a record has no text.
pub const MISSING_TEXT: &str = "No message";

/// Shown when a record has no timestamp.
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// A message as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Store-assigned identifier.
    pub id: MessageId,
    /// Display name of the sender.
    pub sender: String,
    /// Display name of the recipient.
    pub recipient: String,
    /// Message body.
    pub text: String,
    /// Human-readable send time.
    pub timestamp: String,
}

/// Lifecycle state of a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    /// Visible in listings.
    Active,
    /// Soft-deleted; still in the store but never listed.
    Archived,
}

impl From<bool> for MessageState {
    fn from(archived: bool) -> Self {
        if archived { Self::Archived } else { Self::Active }
    }
}

/// A message together with its lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    /// The projected message.
    pub message: Message,
    /// Whether the message is archived.
    pub state: MessageState,
}

impl StoredMessage {
    /// Returns true if the message has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self.state, MessageState::Archived)
    }

    /// Returns the message only if it is still active.
    #[must_use]
    pub fn into_active(self) -> Option<Message> {
        match self.state {
            MessageState::Active => Some(self.message),
            MessageState::Archived => None,
        }
    }
}

/// A message about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Sender display name.
    pub sender: String,
    /// Recipient display name.
    pub recipient: String,
    /// Message body; never empty.
    pub text: String,
}

impl OutgoingMessage {
    /// Creates an outgoing message, substituting the placeholder for a blank body.
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            text: if text.trim().is_empty() {
                EMPTY_MESSAGE_PLACEHOLDER.to_string()
            } else {
                text
            },
        }
    }
}

/// Result of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text was replaced.
    Updated,
    /// The new text was blank, nothing was written.
    Unchanged,
}
