//! # notionmail-store
//!
//! Record store abstraction for `NotionMail`.
//!
//! ## Features
//!
//! - **`RecordStore` trait**: create, query, retrieve and update, one remote call each
//! - **Notion client**: `NotionClient` speaks the Notion REST API over `reqwest`
//! - **Property helpers**: build and read `title`, `rich_text` and `date` values
//! - **In-memory store**: `MemoryStore` with call recording and failure injection
//!
//! ## Quick Start
//!
//! ```ignore
//! use notionmail_store::{Filter, NotionClient, Query, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NotionClient::new("secret_token", "database_id")?;
//!
//!     let query = Query::new().with_filter(Filter::text_equals("Recipient", "Santiago"));
//!     let page = client.query(&query).await?;
//!     println!("{} records, more: {}", page.records.len(), page.next_cursor.is_some());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
mod error;
pub mod memory;
pub mod property;
mod record;
mod store;

pub use client::NotionClient;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use record::{Filter, Patch, Properties, Query, QueryPage, Record, RecordId};
pub use store::RecordStore;
