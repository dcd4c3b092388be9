//! Library root for `orion-bot`.
//!
//! Orion is a Discord persona bot: messages that start with the trigger prefix
//! (`Orion` by default) are forwarded to OpenAI together with a fixed persona
//! prompt, and the completion is posted back to the channel.
//!
//! The bot integrates with Discord for chat and OpenAI for responses. Both sit
//! behind traits so the message pipeline can be exercised with mocks.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::{error, info};

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the bot runtime:
/// - Creates the runtime context with the LLM and chat clients
/// - Starts the gateway listener until shutdown
pub async fn start(config: Config) -> Void {
    info!("Starting orion-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await.inspect_err(|err| error!("Unable to connect to Discord: {err:#}"))?;

    // Start the runtime.
    runtime.start().await.inspect_err(|err| error!("Gateway error: {err:#}"))?;

    info!("Goodbye.");

    Ok(())
}
