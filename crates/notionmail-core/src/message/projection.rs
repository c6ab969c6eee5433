//! Mapping between messages and store records.

use chrono::FixedOffset;
use notionmail_store::{Filter, Patch, Properties, Record, property};

use super::format::humanize;
use super::model::{
    MISSING_TEXT, Message, MessageState, OutgoingMessage, StoredMessage, UNKNOWN_RECIPIENT,
    UNKNOWN_SENDER, UNKNOWN_TIMESTAMP,
};

/// Property holding the sender.
pub const SENDER: &str = "Sender";
/// Property holding the recipient.
pub const RECIPIENT: &str = "Recipient";
/// Property holding the message text (the database title).
pub const TEXT: &str = "Message";
/// Property holding the send time.
pub const TIMESTAMP: &str = "Timestamp";

/// Builds the properties of a new record.
pub(crate) fn to_properties(message: &OutgoingMessage, timestamp: &str) -> Properties {
    let mut properties = Properties::new();
    properties.insert(SENDER.into(), property::rich_text(&message.sender));
    properties.insert(RECIPIENT.into(), property::rich_text(&message.recipient));
    properties.insert(TEXT.into(), property::title(&message.text));
    properties.insert(TIMESTAMP.into(), property::date(timestamp));
    properties
}

/// Patch replacing only the text of a record.
pub(crate) fn text_patch(text: &str) -> Patch {
    Patch::property(TEXT, property::title(text))
}

/// Exact-match filter on the recipient.
pub(crate) fn recipient_filter(recipient: &str) -> Filter {
    Filter::text_equals(RECIPIENT, recipient)
}

/// Projects a record into a message.
///
/// Missing or empty fields fall back to placeholders instead of failing.
pub(crate) fn project(record: &Record, offset: Option<&FixedOffset>) -> StoredMessage {
    let text_of = |name: &str, fallback: &str| {
        record
            .property(name)
            .and_then(property::plain_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };

    let timestamp = record
        .property(TIMESTAMP)
        .and_then(property::date_start)
        .map_or_else(|| UNKNOWN_TIMESTAMP.to_string(), |raw| humanize(raw, offset));

    StoredMessage {
        message: Message {
            id: record.id.clone(),
            sender: text_of(SENDER, UNKNOWN_SENDER),
            recipient: text_of(RECIPIENT, UNKNOWN_RECIPIENT),
            text: text_of(TEXT, MISSING_TEXT),
            timestamp,
        },
        state: MessageState::from(record.archived),
    }
}
