//! Discord gateway integration.
//!
//! This module provides the Discord implementation of `GenericChatClient` on top of
//! `serenity`: it resolves the bot's identity, opens the gateway connection, hands
//! every message-create event to the interaction layer, and posts replies.

use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use serenity::{
    all::{ChannelId, Command, Context, EventHandler, GatewayIntents, GuildId, Message, Ready},
    http::Http,
};
use tracing::{error, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{ChatMessage, Res, Void},
    },
    interaction,
    service::llm::LlmClient,
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the discord implementation.

impl ChatClient {
    /// Creates a new Discord chat client.
    pub async fn discord(config: &Config, llm: LlmClient) -> Res<Self> {
        let client = DiscordChatClient::new(config, llm).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<DiscordChatClient> for ChatClient {
    fn from(client: DiscordChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// Discord client implementation.
#[derive(Clone)]
struct DiscordChatClient {
    pub config: Config,
    pub http: Arc<Http>,
    pub bot_user_id: String,
    pub llm: LlmClient,
}

impl DiscordChatClient {
    /// Create a new Discord chat client.
    #[instrument(name = "DiscordChatClient::new", skip_all)]
    pub async fn new(config: &Config, llm: LlmClient) -> Res<Self> {
        let http = Arc::new(Http::new(&config.discord.bot_token));

        // Get the bot's user ID.

        let bot_user = http.get_current_user().await.context("Failed to authenticate with Discord")?;
        let bot_user_id = bot_user.id.to_string();

        info!("Discord bot user ID: {}", bot_user_id);

        Ok(Self {
            config: config.clone(),
            http,
            bot_user_id,
            llm,
        })
    }
}

#[async_trait]
impl GenericChatClient for DiscordChatClient {
    fn bot_user_id(&self) -> &str {
        &self.bot_user_id
    }

    async fn start(&self) -> Void {
        let intents = GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

        let handler = DiscordEventHandler {
            config: self.config.clone(),
            llm: self.llm.clone(),
            chat: ChatClient::from(self.clone()),
        };

        let mut client = serenity::Client::builder(&self.config.discord.bot_token, intents)
            .event_handler(handler)
            .await
            .context("Failed to create the Discord gateway client")?;

        // Close the gateway on SIGINT / SIGTERM, which makes `start` below return.

        let shard_manager = client.shard_manager.clone();

        tokio::spawn(async move {
            shutdown_signal().await;
            info!("Shutting down the Discord gateway ...");
            shard_manager.shutdown_all().await;
        });

        info!("Bot is now running. Press CTRL-C to exit.");

        client.start().await.context("Discord gateway connection failed")?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn send_message(&self, channel_id: &str, text: &str) -> Void {
        let channel_id = parse_channel_id(channel_id)?;

        channel_id.say(&self.http, text).await.context("Failed to send message")?;

        Ok(())
    }
}

// Gateway event callbacks.

/// Event handler state for the gateway client.
struct DiscordEventHandler {
    config: Config,
    llm: LlmClient,
    chat: ChatClient,
}

#[async_trait]
impl EventHandler for DiscordEventHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Connected to Discord as {} ({}).", ready.user.name, ready.user.id);

        let result = match command_removal_scope(&self.config) {
            Ok(Some(scope)) => remove_commands(&ctx.http, scope).await,
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            error!("Failed to remove application commands: {}", err);
        }
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        let message = to_chat_message(&msg);

        interaction::message::handle_message(message, &self.config, &self.llm, &self.chat).await;
    }
}

/// Which application commands to remove on `ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandScope {
    Guild(GuildId),
    Global,
}

/// The commands to remove on startup, or `None` when removal is disabled.
fn command_removal_scope(config: &Config) -> Res<Option<CommandScope>> {
    if !config.discord.remove_commands {
        return Ok(None);
    }

    let scope = match config.discord.guild_id()? {
        Some(id) => CommandScope::Guild(GuildId::new(id)),
        None => CommandScope::Global,
    };

    Ok(Some(scope))
}

/// Remove registered application commands in `scope`.
#[instrument(skip(http))]
async fn remove_commands(http: &Arc<Http>, scope: CommandScope) -> Void {
    match scope {
        CommandScope::Guild(guild_id) => {
            for command in guild_id.get_commands(http).await? {
                info!("Removing guild command `{}` ...", command.name);
                guild_id.delete_command(http, command.id).await?;
            }
        }
        CommandScope::Global => {
            for command in Command::get_global_commands(http).await? {
                info!("Removing global command `{}` ...", command.name);
                Command::delete_global_command(http, command.id).await?;
            }
        }
    }

    Ok(())
}

/// Convert a serenity `Message` into a `ChatMessage`.
fn to_chat_message(msg: &Message) -> ChatMessage {
    ChatMessage {
        author_id: msg.author.id.to_string(),
        channel_id: msg.channel_id.to_string(),
        guild_id: msg.guild_id.map(|g| g.to_string()),
        content: msg.content.clone(),
    }
}

/// Parse a channel snowflake.
fn parse_channel_id(channel_id: &str) -> Res<ChannelId> {
    let id = channel_id.parse::<u64>().with_context(|| format!("Invalid channel ID `{channel_id}`."))?;

    if id == 0 {
        return Err(anyhow::anyhow!("Channel ID must not be zero."));
    }

    Ok(ChannelId::new(id))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(err) => {
                warn!("Unable to listen for SIGTERM: {}", err);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use crate::base::config::{ConfigInner, DiscordConfig};

    use super::*;

    fn create_test_config(guild_id: Option<&str>, remove_commands: bool) -> Config {
        Config {
            inner: Arc::new(ConfigInner {
                discord: DiscordConfig {
                    bot_token: "discord-token".to_string(),
                    guild_id: guild_id.map(str::to_string),
                    remove_commands,
                },
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_command_removal_disabled() {
        let config = create_test_config(Some("1300000000000000001"), false);

        assert_eq!(command_removal_scope(&config).unwrap(), None);
    }

    #[test]
    fn test_command_removal_guild_scope() {
        let config = create_test_config(Some("1300000000000000001"), true);

        assert_eq!(command_removal_scope(&config).unwrap(), Some(CommandScope::Guild(GuildId::new(1300000000000000001))));
    }

    #[test]
    fn test_command_removal_global_scope() {
        let config = create_test_config(None, true);

        assert_eq!(command_removal_scope(&config).unwrap(), Some(CommandScope::Global));
    }

    #[test]
    fn test_command_removal_invalid_guild() {
        let config = create_test_config(Some("general"), true);

        assert!(command_removal_scope(&config).is_err());
    }

    #[test]
    fn test_parse_channel_id() {
        assert_eq!(parse_channel_id("1096186453154152498").unwrap(), ChannelId::new(1096186453154152498));
    }

    #[test]
    fn test_parse_channel_id_rejects_garbage() {
        assert!(parse_channel_id("general").is_err());
        assert!(parse_channel_id("").is_err());
        assert!(parse_channel_id("0").is_err());
    }
}
