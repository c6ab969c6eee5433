//! Core services for message operations.
//!
//! This module provides the service layer that bridges the shell
//! with the underlying record store.

pub mod messages;

pub use messages::MessageService;
