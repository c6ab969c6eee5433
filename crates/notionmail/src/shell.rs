//! Interactive prompt loop.
//!
//! Reads one command per line, asks for its arguments, calls the message
//! service and prints the outcome. Every failure is reported on the output
//! and the loop continues; only `quit` or end of input stops it.

use std::io::{self, Write};

use notionmail_core::{EditOutcome, Error, MessageId, MessageService};
use notionmail_store::RecordStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::command::Command;
use crate::view;

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Interactive session over a line-oriented input and a text output.
pub struct Shell<S, R, W> {
    service: MessageService<S>,
    input: R,
    output: W,
}

impl<S, R, W> Shell<S, R, W>
where
    S: RecordStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Creates a session.
    pub const fn new(service: MessageService<S>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.print(&view::menu())?;

            let Some(choice) = self.prompt("Your choice: $ ").await? else {
                break;
            };

            let flow = match Command::parse(&choice) {
                Some(command) => {
                    debug!("Running {}", command.name());
                    self.execute(command).await?
                }
                None => {
                    self.print("\nInvalid option! Please try again.\n")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Stop {
                break;
            }
        }
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Send => self.send().await,
            Command::Read => self.read().await,
            Command::Delete => self.delete().await,
            Command::Edit => self.edit().await,
            Command::Clear => self.clear().await,
            Command::Help => Ok(Flow::Continue),
            Command::Quit => {
                self.print("\nGoodbye! Thanks for using NotionMail!\n")?;
                Ok(Flow::Stop)
            }
        }
    }

    async fn send(&mut self) -> io::Result<Flow> {
        self.print("\nLet's send a new message!\n\n")?;
        let Some(sender) = self.prompt("   Sender: $ ").await? else {
            return Ok(Flow::Stop);
        };
        let Some(recipient) = self.prompt("   Recipient: $ ").await? else {
            return Ok(Flow::Stop);
        };
        let Some(text) = self.prompt("   Message: $ ").await? else {
            return Ok(Flow::Stop);
        };

        match self.service.send(&sender, &recipient, &text).await {
            Ok(id) => self.print(&format!(
                "\nMessage sent successfully!\nMessage ID: {id}\n"
            ))?,
            Err(e) => self.report("Failed to send message.", &e)?,
        }
        Ok(Flow::Continue)
    }

    async fn read(&mut self) -> io::Result<Flow> {
        self.print("\nLet's view your inbox!\n\n")?;
        let Some(name) = self.prompt("   Your name: $ ").await? else {
            return Ok(Flow::Stop);
        };

        self.print("\nFetching messages...\n")?;
        match self.service.try_list_for(&name).await {
            Ok(messages) => self.print(&view::listing(&messages))?,
            Err(e) => self.report("Failed to fetch messages.", &e)?,
        }
        Ok(Flow::Continue)
    }

    async fn delete(&mut self) -> io::Result<Flow> {
        self.print("\nLet's delete a message!\n\n")?;
        let Some(id) = self.prompt("   Message ID to delete: $ ").await? else {
            return Ok(Flow::Stop);
        };
        let id = MessageId::new(id.trim());

        match self.service.delete_one(&id).await {
            Ok(()) => self.print(&format!("\nMessage with ID {id} has been deleted.\n"))?,
            Err(e) => self.report(&format!("Failed to delete message with ID {id}."), &e)?,
        }
        Ok(Flow::Continue)
    }

    async fn edit(&mut self) -> io::Result<Flow> {
        self.print("\nLet's edit a message!\n\n")?;
        let Some(id) = self.prompt("   Message ID to edit: $ ").await? else {
            return Ok(Flow::Stop);
        };
        let id = MessageId::new(id.trim());
        let failed = format!("Failed to edit message with ID {id}.");

        let current = match self.service.retrieve(&id).await {
            Ok(stored) if stored.is_archived() => {
                self.report(&failed, &Error::NotFound(id.to_string()))?;
                return Ok(Flow::Continue);
            }
            Ok(stored) => stored.message,
            Err(e) => {
                self.report(&failed, &e)?;
                return Ok(Flow::Continue);
            }
        };

        self.print(&format!("\nCurrent message: \"{}\"\n", current.text))?;
        let Some(new_text) = self
            .prompt("   Enter new message content (leave blank to keep unchanged): $ ")
            .await?
        else {
            return Ok(Flow::Stop);
        };

        match self.service.edit(&id, &new_text).await {
            Ok(EditOutcome::Updated) => {
                self.print(&format!("\nMessage updated to: \"{new_text}\"\n"))?;
            }
            Ok(EditOutcome::Unchanged) => self.print("\nNo changes were made.\n")?,
            Err(e) => self.report(&failed, &e)?,
        }
        Ok(Flow::Continue)
    }

    async fn clear(&mut self) -> io::Result<Flow> {
        let Some(answer) = self
            .prompt("\nDelete EVERY message in the database? (y/N): $ ")
            .await?
        else {
            return Ok(Flow::Stop);
        };

        if !answer.trim().eq_ignore_ascii_case("y") {
            self.print("\nNothing was deleted.\n")?;
            return Ok(Flow::Continue);
        }

        match self.service.delete_all().await {
            Ok(count) => self.print(&format!("\nDeleted {count} messages.\n"))?,
            Err(e) => self.report("Failed to delete every message.", &e)?,
        }
        Ok(Flow::Continue)
    }

    /// Writes a prompt and reads one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.print(label)?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn report(&mut self, headline: &str, error: &Error) -> io::Result<()> {
        self.print(&format!("\n{headline}\nError: {error}\n"))
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use notionmail_store::MemoryStore;
    use notionmail_store::memory::Failure;

    fn service(store: MemoryStore) -> MessageService<MemoryStore> {
        MessageService::new(store).with_display_offset(FixedOffset::east_opt(0).unwrap())
    }

    /// Runs a scripted session and returns the service and everything printed.
    async fn run(
        service: MessageService<MemoryStore>,
        script: &str,
    ) -> (MessageService<MemoryStore>, String) {
        let mut shell = Shell::new(service, script.as_bytes(), Vec::new());
        shell.run().await.unwrap();
        let Shell {
            service, output, ..
        } = shell;
        (service, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let (_, out) = run(service(MemoryStore::new()), "quit\nsend\n").await;
        assert!(out.contains("Goodbye!"));
        assert_eq!(out.matches("Your choice").count(), 1);
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let (_, out) = run(service(MemoryStore::new()), "").await;
        assert!(out.contains("Welcome to NotionMail!"));
    }

    #[tokio::test]
    async fn test_invalid_option_redisplays_menu() {
        let (_, out) = run(service(MemoryStore::new()), "bogus\nquit\n").await;
        assert!(out.contains("Invalid option! Please try again."));
        assert_eq!(out.matches("Welcome to NotionMail!").count(), 2);
    }

    #[tokio::test]
    async fn test_send_then_read() {
        let script = "SEND\nRichael\nSantiago\nHello, Santiago!\nread\nSantiago\nquit\n";
        let (service, out) = run(service(MemoryStore::new()), script).await;

        assert!(out.contains("Message sent successfully!"));
        assert!(out.contains("From: Richael"));
        assert!(out.contains("Message: \"Hello, Santiago!\""));
        assert!(out.contains("Total messages found: 1"));
        assert_eq!(service.store().records().len(), 1);
    }

    #[tokio::test]
    async fn test_send_with_blank_sender_is_rejected() {
        let script = "send\n\nSantiago\nhi\nquit\n";
        let (service, out) = run(service(MemoryStore::new()), script).await;

        assert!(out.contains("Failed to send message."));
        assert!(out.contains("Sender is required"));
        assert!(service.store().records().is_empty());
    }

    #[tokio::test]
    async fn test_read_reports_store_failure() {
        let store = MemoryStore::new().with_failure(Failure::Queries);
        let (_, out) = run(service(store), "read\nSantiago\nquit\n").await;
        assert!(out.contains("Failed to fetch messages."));
    }

    #[tokio::test]
    async fn test_edit_flow() {
        let service = service(MemoryStore::new());
        let id = service
            .send("Richael", "Santiago", "Old Message")
            .await
            .unwrap();

        let script = format!("edit\n{id}\nUpdated Message\nedit\n{id}\n\nquit\n");
        let (service, out) = run(service, &script).await;

        assert!(out.contains("Current message: \"Old Message\""));
        assert!(out.contains("Message updated to: \"Updated Message\""));
        assert!(out.contains("No changes were made."));
        let stored = service.retrieve(&id).await.unwrap();
        assert_eq!(stored.message.text, "Updated Message");
    }

    #[tokio::test]
    async fn test_edit_unknown_id() {
        let (_, out) = run(service(MemoryStore::new()), "edit\npage-404\nquit\n").await;
        assert!(out.contains("Failed to edit message with ID page-404."));
        assert!(!out.contains("Current message"));
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let service = service(MemoryStore::new());
        let id = service.send("Richael", "Santiago", "bye").await.unwrap();

        let script = format!("delete\n  {id}  \nread\nSantiago\nquit\n");
        let (_, out) = run(service, &script).await;

        assert!(out.contains(&format!("Message with ID {id} has been deleted.")));
        assert!(out.contains("Total messages found: 0"));
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let service = service(MemoryStore::new());
        service.send("Richael", "Santiago", "one").await.unwrap();
        service.send("Santiago", "Richael", "two").await.unwrap();

        let (service, out) = run(service, "clear\nn\nclear\ny\nquit\n").await;
        assert!(out.contains("Nothing was deleted."));
        assert!(out.contains("Deleted 2 messages."));
        assert!(service.store().records().iter().all(|r| r.archived));
    }

    #[tokio::test]
    async fn test_crlf_input() {
        let script = "send\r\nRichael\r\nSantiago\r\nhi\r\nquit\r\n";
        let (service, _) = run(service(MemoryStore::new()), script).await;
        let listed = service.list_for("Santiago").await.unwrap();
        assert_eq!(listed[0].sender, "Richael");
    }
}
