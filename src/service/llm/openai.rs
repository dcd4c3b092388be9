//! Integration with the OpenAI chat completion API.
//!
//! This module provides a thin wrapper around the `async-openai` client that
//! sends a single user-role message and returns the first choice's text.

use std::sync::Arc;

use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
};
use async_trait::async_trait;
use tracing::{debug, info, instrument, trace};

use crate::base::{config::Config, types::Res};

use super::{GenericLlmClient, LlmClient};

// Extra methods on `LlmClient` applied by the openai implementation.

impl LlmClient {
    pub fn openai(config: &Config) -> Self {
        let client = OpenAiLlmClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// OpenAI LLM client implementation.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiLlmClient {
    /// Create a new OpenAI LLM client.
    #[instrument(name = "OpenAiLlmClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        let cfg = OpenAIConfig::new().with_api_key(config.openai.secret_key.clone());

        Self::with_openai_config(cfg, &config.openai.model)
    }

    /// Create a new OpenAI LLM client from an explicit `async-openai` configuration.
    pub fn with_openai_config(cfg: OpenAIConfig, model: &str) -> Self {
        Self {
            client: Client::with_config(cfg),
            model: model.to_string(),
        }
    }

    /// Build the completion request: one user message carrying the whole prompt.
    fn build_completion_request(&self, prompt: &str) -> Res<CreateChatCompletionRequest> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default().content(prompt).build()?.into();

        let request = CreateChatCompletionRequestArgs::default().model(&self.model).messages(vec![message]).build()?;

        Ok(request)
    }
}

#[async_trait]
impl GenericLlmClient for OpenAiLlmClient {
    #[instrument(name = "OpenAiLlmClient::get_completion", skip_all)]
    async fn get_completion(&self, prompt: &str) -> Res<String> {
        let request = self.build_completion_request(prompt)?;

        debug!("Sending completion request to `{}` ...", self.model);

        let response = self.client.chat().create(request).await?;

        if let Ok(raw) = serde_json::to_string(&response) {
            trace!("Raw completion response: {raw}");
        }

        let text = parse_completion_response(response)?;

        info!("Completion: {text}");

        Ok(text)
    }
}

/// Extract the first choice's text from a completion response.
pub fn parse_completion_response(response: CreateChatCompletionResponse) -> Res<String> {
    let choice = response.choices.into_iter().next().ok_or(anyhow::anyhow!("Completion response has no choices."))?;

    match (choice.message.content, choice.message.refusal) {
        (Some(content), _) => Ok(content),
        (None, Some(reason)) => Err(anyhow::anyhow!("Request refused: {reason}")),
        (None, None) => Err(anyhow::anyhow!("Completion response has no content.")),
    }
}

// Tests.
