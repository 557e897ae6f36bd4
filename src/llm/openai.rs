use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::llm::prompts::{build_analysis_prompt, NO_ANALYSIS, SYSTEM_PROMPT};
use crate::llm::provider::LlmProvider;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const AZURE_API_VERSION: &str = "2024-02-15-preview";

// Bounded output, low temperature for focused answers.
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;

/// Chat-completion client for the public OpenAI endpoint or an Azure OpenAI
/// deployment, selected by whether the configured endpoint is empty.
pub struct OpenAiProvider {
    client: Client,
    config: ProviderConfig,
}

#[derive(Serialize)]
struct ChatRequest {
    /// Omitted on Azure, where the deployment is part of the URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn is_azure(&self) -> bool {
        !self.config.endpoint.is_empty()
    }

    fn request_url(&self) -> String {
        if self.is_azure() {
            format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.config.endpoint.trim_end_matches('/'),
                self.config.deployment,
                AZURE_API_VERSION
            )
        } else {
            OPENAI_URL.to_string()
        }
    }

    fn build_request(&self, diff: &str, issue: &str) -> ChatRequest {
        ChatRequest {
            model: if self.is_azure() {
                None
            } else {
                Some(self.config.deployment.clone())
            },
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_analysis_prompt(diff, issue),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

fn first_choice_text(response: ChatResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(Error::ModelApi(error.message));
    }

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_ANALYSIS.to_string()))
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn analyze(&self, diff: &str, issue: &str) -> Result<String> {
        let body = self.build_request(diff, issue);
        tracing::debug!("Sending {} byte diff to {}", diff.len(), self.name());

        let mut request = self
            .client
            .post(self.request_url())
            .header("content-type", "application/json");
        request = if self.is_azure() {
            request.header("api-key", &self.config.api_key)
        } else {
            request.bearer_auth(&self.config.api_key)
        };

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ModelApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ModelApi(format!(
                "Chat completion error ({}): {}",
                status, body
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::ModelApi(format!("Failed to parse response: {}", e)))?;

        first_choice_text(result)
    }

    fn name(&self) -> &str {
        if self.is_azure() {
            "Azure OpenAI"
        } else {
            "OpenAI"
        }
    }
}
