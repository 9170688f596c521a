//! Network message handlers
//!
//! This module provides message handlers for different types of network messages.

pub mod transaction_handler;

pub use transaction_handler::TransactionMessageHandler;
