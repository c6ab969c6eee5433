//! Text rendering for the shell.

use std::fmt::Write;

use notionmail_core::Message;

use crate::command::Command;

const RULE: &str = "=========================================================";

/// Renders the main menu.
pub fn menu() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "              Welcome to NotionMail!");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Please select an option:\n");
    for command in Command::ALL {
        let _ = writeln!(
            out,
            "   {:<8}: {}",
            command.name(),
            command.description()
        );
    }
    let _ = writeln!(out, "{RULE}");
    out
}

/// Renders one message of a listing.
pub fn message_card(message: &Message) -> String {
    format!(
        "\nMessage ID: {}\n   From: {}\n   Sent At: {}\n   Message: \"{}\"\n",
        message.id, message.sender, message.timestamp, message.text
    )
}

/// Renders a full listing with its total.
pub fn listing(messages: &[Message]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&message_card(message));
    }
    let _ = writeln!(out, "\nTotal messages found: {}\n", messages.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use notionmail_core::MessageId;

    fn message() -> Message {
        Message {
            id: MessageId::new("mockPageId1"),
            sender: "Richael".into(),
            recipient: "Santiago".into(),
            text: "Hello, Santiago!".into(),
            timestamp: "January 1st, 2023 @ 12:00am".into(),
        }
    }

    #[test]
    fn test_menu_lists_every_command() {
        let menu = menu();
        for command in Command::ALL {
            assert!(menu.contains(command.name()), "missing {}", command.name());
        }
    }

    #[test]
    fn test_message_card() {
        let card = message_card(&message());
        assert!(card.contains("Message ID: mockPageId1"));
        assert!(card.contains("From: Richael"));
        assert!(card.contains("Sent At: January 1st, 2023 @ 12:00am"));
        assert!(card.contains("Message: \"Hello, Santiago!\""));
    }

    #[test]
    fn test_listing_counts() {
        let out = listing(&[message(), message()]);
        assert!(out.contains("Total messages found: 2"));
        assert!(listing(&[]).contains("Total messages found: 0"));
    }
}
