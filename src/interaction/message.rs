//! Handles inbound chat messages end to end.

use tracing::{Instrument, debug, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{ChatMessage, PLACEHOLDER_REPLY},
    },
    interaction::{
        filter::{Disposition, classify},
        relay::relay,
        reply::dispatch_reply,
    },
    service::{chat::ChatClient, llm::LlmClient},
};

/// Handles a message-create event.
///
/// Runs inline on the gateway's event task: the call returns once the reply has been
/// sent (or its failure logged). Nothing is retained between messages.
#[instrument(skip_all, fields(channel_id = %message.channel_id))]
pub async fn handle_message(message: ChatMessage, config: &Config, llm: &LlmClient, chat: &ChatClient) {
    let reply = match classify(&message, chat.bot_user_id(), config) {
        Disposition::Ignore => {
            debug!("Ignoring message.");
            return;
        }
        Disposition::Placeholder => {
            info!("Question is too long, replying with the placeholder ...");
            PLACEHOLDER_REPLY.to_string()
        }
        Disposition::Relay => {
            info!("Relaying question to the completion service ...");
            relay(llm, &config.bot.persona_prompt, &message.content).in_current_span().await
        }
    };

    dispatch_reply(chat, &message.channel_id, &reply).in_current_span().await;
}
