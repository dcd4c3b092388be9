//! Core components, types, and utilities for the bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The persona prompt for the completion service.
//! - Common types and result handling.

pub mod config;
pub mod prompts;
pub mod types;
