pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// The reply sent when the completion service fails or a question is skipped.
pub const PLACEHOLDER_REPLY: &str = "...";

/// An inbound chat message, reduced to what the bot needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// The user ID of the message author.
    pub author_id: String,
    /// The channel the message was posted in.
    pub channel_id: String,
    /// The guild the message was posted in (`None` for direct messages).
    pub guild_id: Option<String>,
    /// The raw message content.
    pub content: String,
}
