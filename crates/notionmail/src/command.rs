//! Shell commands.

/// A menu choice entered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Send a new message.
    Send,
    /// List the messages addressed to someone.
    Read,
    /// Archive one message.
    Delete,
    /// Replace the text of a message.
    Edit,
    /// Archive every message.
    Clear,
    /// Show the menu again.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Send,
        Self::Read,
        Self::Delete,
        Self::Edit,
        Self::Clear,
        Self::Help,
        Self::Quit,
    ];

    /// Parses a choice, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(input))
    }

    /// The word typed to select this command.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Read => "read",
            Self::Delete => "delete",
            Self::Edit => "edit",
            Self::Clear => "clear",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    /// One-line description shown in the menu.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Send => "Send a new message.",
            Self::Read => "View your inbox.",
            Self::Delete => "Delete a message.",
            Self::Edit => "Edit a message.",
            Self::Clear => "Delete every message.",
            Self::Help => "Show this menu.",
            Self::Quit => "Exit the application.",
        }
    }
}
