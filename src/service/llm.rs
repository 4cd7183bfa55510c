//! Shared LLM client for narrative suggestion and template generation
//!
//! Wraps the OpenAI provider behind a single free-text completion call. The
//! client is optional at the application level; every consumer must degrade
//! to placeholder text when it is absent.

use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

const ENV_SUGGESTION_MODEL: &str = "SUGGESTION_MODEL";
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
    model: String,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::builder(api_key)
            .build()
            .map_err(|e| format!("Failed to create OpenAI client: {}", e))?;

        let model =
            std::env::var(ENV_SUGGESTION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self { client, model })
    }

    /// One free-form completion with a system preamble
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, String> {
        let agent = self.client.agent(&self.model).preamble(system).build();

        agent.prompt(prompt).await.map_err(|e| e.to_string())
    }
}
