//! `NotionMail` - terminal client for short messages kept in a Notion database
//!
//! Reads `NOTION_API_KEY` and `NOTION_PAGE_ID` from the environment (or a
//! `.env` file) and runs an interactive prompt on stdin/stdout.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod command;
mod shell;
mod view;

use anyhow::Context;
use notionmail_core::{Config, MessageService};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "notionmail=info,notionmail_core=info,notionmail_store=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let client = config
        .connect()
        .context("failed to create Notion client")?;
    info!(database = client.database_id(), "Starting NotionMail");

    let service = MessageService::new(client);
    let mut shell = Shell::new(service, BufReader::new(tokio::io::stdin()), std::io::stdout());
    shell.run().await.context("terminal I/O failed")?;

    Ok(())
}
