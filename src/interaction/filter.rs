//! Decides whether (and how) the bot answers a message.

use crate::base::{config::Config, types::ChatMessage};

/// What to do with an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Do nothing.
    Ignore,
    /// Reply with the placeholder without contacting the completion service.
    Placeholder,
    /// Forward the content to the completion service.
    Relay,
}

/// Classify a message.
///
/// Messages from the bot itself, from outside the configured guild, or without the
/// trigger prefix are ignored. Questions longer than the configured limit (counted
/// in characters) get the placeholder reply.
pub fn classify(message: &ChatMessage, bot_user_id: &str, config: &Config) -> Disposition {
    if message.author_id == bot_user_id {
        return Disposition::Ignore;
    }

    if let Some(guild_id) = config.discord.guild_id.as_deref()
        && message.guild_id.as_deref() != Some(guild_id)
    {
        return Disposition::Ignore;
    }

    if !message.content.starts_with(&config.bot.trigger_prefix) {
        return Disposition::Ignore;
    }

    if message.content.chars().count() > config.bot.max_question_length {
        return Disposition::Placeholder;
    }

    Disposition::Relay
}

// Tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::base::config::{ConfigInner, DiscordConfig};

    const BOT_USER_ID: &str = "1100000000000000001";

    fn create_test_config(guild_id: Option<&str>) -> Config {
        Config {
            inner: Arc::new(ConfigInner {
                discord: DiscordConfig {
                    bot_token: "discord-token".to_string(),
                    guild_id: guild_id.map(str::to_string),
                    ..Default::default()
                },
                ..Default::default()
            }),
        }
    }

    fn create_test_message(author_id: &str, content: &str) -> ChatMessage {
        ChatMessage {
            author_id: author_id.to_string(),
            channel_id: "1200000000000000001".to_string(),
            guild_id: Some("1300000000000000001".to_string()),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_relays_prefixed_question() {
        let config = create_test_config(None);
        let message = create_test_message("42", "Orion are you birb?");

        assert_eq!(classify(&message, BOT_USER_ID, &config), Disposition::Relay);
    }

    #[test]
    fn test_ignores_own_messages() {
        let config = create_test_config(None);
        let message = create_test_message(BOT_USER_ID, "Orion are you birb?");

        assert_eq!(classify(&message, BOT_USER_ID, &config), Disposition::Ignore);
    }

    #[test]
    fn test_ignores_unprefixed_messages() {
        let config = create_test_config(None);

        for content in ["are you birb?", "orion are you birb?", " Orion are you birb?", "", "ORION"] {
            let message = create_test_message("42", content);
            assert_eq!(classify(&message, BOT_USER_ID, &config), Disposition::Ignore, "content: {content:?}");
        }
    }

    #[test]
    fn test_long_questions_get_placeholder() {
        let config = create_test_config(None);
        let message = create_test_message("42", "Orion, tell me a very long story about owls please!!");

        assert_eq!(message.content.chars().count(), 52);
        assert_eq!(classify(&message, BOT_USER_ID, &config), Disposition::Placeholder);
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        let config = create_test_config(None);

        let at_limit = create_test_message("42", &format!("Orion{}", "?".repeat(45)));
        let over_limit = create_test_message("42", &format!("Orion{}", "?".repeat(46)));

        assert_eq!(classify(&at_limit, BOT_USER_ID, &config), Disposition::Relay);
        assert_eq!(classify(&over_limit, BOT_USER_ID, &config), Disposition::Placeholder);
    }

    #[test]
    fn test_length_counts_characters() {
        let config = create_test_config(None);
        let message = create_test_message("42", &format!("Orion {}", "🦉".repeat(44)));

        assert!(message.content.len() > 50);
        assert_eq!(classify(&message, BOT_USER_ID, &config), Disposition::Relay);
    }

    #[test]
    fn test_guild_scope() {
        let config = create_test_config(Some("1300000000000000001"));

        let in_guild = create_test_message("42", "Orion are you birb?");
        let mut other_guild = in_guild.clone();
        other_guild.guild_id = Some("1300000000000000002".to_string());
        let mut direct = in_guild.clone();
        direct.guild_id = None;

        assert_eq!(classify(&in_guild, BOT_USER_ID, &config), Disposition::Relay);
        assert_eq!(classify(&other_guild, BOT_USER_ID, &config), Disposition::Ignore);
        assert_eq!(classify(&direct, BOT_USER_ID, &config), Disposition::Ignore);
    }
}
