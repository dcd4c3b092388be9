//! Forwards a question to the completion service.

use tracing::{error, instrument};

use crate::{base::types::PLACEHOLDER_REPLY, service::llm::LlmClient};

/// Ask the completion service to answer `text` in persona.
///
/// The persona prompt is prepended verbatim. Any failure is logged and turned
/// into the placeholder reply; there are no retries.
#[instrument(skip_all)]
pub async fn relay(llm: &LlmClient, persona_prompt: &str, text: &str) -> String {
    let prompt = format!("{persona_prompt}{text}");

    match llm.get_completion(&prompt).await {
        Ok(completion) => completion,
        Err(err) => {
            error!("Completion request failed: {}", err);
            PLACEHOLDER_REPLY.to_string()
        }
    }
}

// Tests.
