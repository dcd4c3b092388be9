//! Load configuration via `config` crate with env-override support.

use std::{
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use serde::Deserialize;

use crate::base::prompts;

use super::types::Res;

/// Config file used when no explicit path is given (optional).
pub const DEFAULT_CONFIG_PATH: &str = "/etc/orion/orion.toml";

/// Prefix for environment overrides (e.g., `ORION_DISCORD__BOT_TOKEN`).
pub const ENV_PREFIX: &str = "ORION";

/// Default OpenAI model to use.
fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

/// Default prefix a message must start with to get a reply.
fn default_trigger_prefix() -> String {
    "Orion".to_string()
}

/// Default maximum question length, in characters.
fn default_max_question_length() -> usize {
    50
}

/// Default persona prompt.
fn default_persona_prompt() -> String {
    prompts::PERSONA_PROMPT.to_string()
}

/// Configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Discord gateway settings (`[discord]`).
    pub discord: DiscordConfig,
    /// OpenAI settings (`[openai]`).
    pub openai: OpenAiConfig,
    /// Reply behavior (`[bot]`, optional).
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DiscordConfig {
    /// Discord bot token (`ORION_DISCORD__BOT_TOKEN`).
    pub bot_token: String,
    /// Only answer messages from this guild (`ORION_DISCORD__GUILD_ID`).
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Remove registered application commands on startup (`ORION_DISCORD__REMOVE`).
    #[serde(default, rename = "remove")]
    pub remove_commands: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiConfig {
    /// OpenAI secret key (`ORION_OPENAI__SECRET_KEY`).
    pub secret_key: String,
    /// Chat completion model (`ORION_OPENAI__MODEL`).
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            model: default_openai_model(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    /// Case-sensitive prefix that triggers a reply (`ORION_BOT__TRIGGER_PREFIX`).
    #[serde(default = "default_trigger_prefix")]
    pub trigger_prefix: String,
    /// Longer questions get the placeholder reply (`ORION_BOT__MAX_QUESTION_LENGTH`).
    #[serde(default = "default_max_question_length")]
    pub max_question_length: usize,
    /// Text prepended to every question (`ORION_BOT__PERSONA_PROMPT`).
    #[serde(default = "default_persona_prompt")]
    pub persona_prompt: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            trigger_prefix: default_trigger_prefix(),
            max_question_length: default_max_question_length(),
            persona_prompt: default_persona_prompt(),
        }
    }
}

impl DiscordConfig {
    /// The guild scope as a numeric snowflake, if one is configured.
    pub fn guild_id(&self) -> Res<Option<u64>> {
        let Some(guild_id) = self.guild_id.as_deref() else {
            return Ok(None);
        };

        let id = guild_id.trim().parse::<u64>().with_context(|| format!("Guild ID `{guild_id}` is not a valid snowflake."))?;

        if id == 0 {
            return Err(anyhow::anyhow!("Guild ID must not be zero."));
        }

        Ok(Some(id))
    }
}

impl Config {
    /// Load the configuration from the file and `ORION_*` environment variables.
    ///
    /// An explicit path must exist; the default path is only read when present.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        Self::load_with_env(explicit_path, None)
    }

    /// Load the configuration, optionally replacing the process environment with `env`.
    fn load_with_env(explicit_path: Option<&Path>, env: Option<config::Map<String, String>>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        let path = match explicit_path {
            Some(p) => Some(p.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|p| p.exists()),
        };

        if let Some(p) = &path {
            cfg = cfg.add_source(config::File::from(p.clone()).format(config::FileFormat::Toml).required(true));
        }

        cfg = cfg.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let describe = || match &path {
            Some(p) => format!("Unable to load configuration from `{}`.", p.display()),
            None => "Unable to load configuration from the environment.".to_string(),
        };

        let mut inner: ConfigInner = cfg.build().with_context(describe)?.try_deserialize().with_context(describe)?;

        if inner.discord.guild_id.as_deref().is_some_and(|g| g.trim().is_empty()) {
            inner.discord.guild_id = None;
        }

        // Guild scope is kept in canonical snowflake form.
        inner.discord.guild_id = inner.discord.guild_id()?.map(|id| id.to_string());

        let result = Config { inner: Arc::new(inner) };

        result.validate()?;

        Ok(result)
    }

    /// Check the invariants that must hold before the listener starts.
    pub fn validate(&self) -> Res<()> {
        if self.discord.bot_token.trim().is_empty() {
            return Err(anyhow::anyhow!("Discord bot token must not be empty."));
        }

        if self.openai.secret_key.trim().is_empty() {
            return Err(anyhow::anyhow!("OpenAI secret key must not be empty."));
        }

        if self.openai.model.trim().is_empty() {
            return Err(anyhow::anyhow!("OpenAI model must not be empty."));
        }

        if self.bot.trigger_prefix.is_empty() {
            return Err(anyhow::anyhow!("Trigger prefix must not be empty."));
        }

        if self.bot.max_question_length < 1 {
            return Err(anyhow::anyhow!("Max question length must be at least 1."));
        }

        self.discord.guild_id()?;

        Ok(())
    }
}

// Tests.
