//! Event handling and user interactions for the bot.
//!
//! This module provides functionality for handling chat events:
//! - Deciding whether a message deserves a reply
//! - Relaying questions to the completion service
//! - Sending the reply back to the channel

pub mod filter;
pub mod message;
pub mod relay;
pub mod reply;
