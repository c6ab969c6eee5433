//! # notionmail-core
//!
//! Core business logic for the `NotionMail` client.
//!
//! This crate provides:
//! - The message model and its record mapping
//! - Field validation
//! - Timestamp rendering
//! - Environment configuration
//! - **Message service** - send, list, edit and archive messages in a record store

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod message;
pub mod service;

pub use config::Config;
pub use error::{Error, Result};
pub use message::{
    EditOutcome, Message, MessageId, MessageState, OutgoingMessage, StoredMessage,
    ValidationError,
};
pub use service::MessageService;
