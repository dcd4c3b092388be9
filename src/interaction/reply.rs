//! Sends replies back to the originating channel.

use tracing::{error, instrument};

use crate::service::chat::ChatClient;

/// Send `text` to `channel_id`, logging (and otherwise dropping) any failure.
#[instrument(skip(chat, text))]
pub async fn dispatch_reply(chat: &ChatClient, channel_id: &str, text: &str) {
    if let Err(err) = chat.send_message(channel_id, text).await {
        error!("Failed to reply in channel {}: {}", channel_id, err);
    }
}
