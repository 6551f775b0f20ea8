use super::{CompletionProvider, Message};
use crate::core::error::ChatError;
use crate::providers::base_client::HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<MessageContent>,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// OpenRouter chat completions client. `HTTP-Referer` and `X-Title` identify
/// the calling site on OpenRouter's dashboards.
#[derive(Clone)]
pub struct OpenRouterProvider {
    client: HttpClient,
}

impl OpenRouterProvider {
    pub fn new(
        endpoint: String,
        api_key: String,
        site_url: &str,
        site_name: &str,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let extra_headers = vec![
            ("HTTP-Referer".to_string(), site_url.to_string()),
            ("X-Title".to_string(), site_name.to_string()),
        ];
        Ok(Self {
            client: HttpClient::new(endpoint, api_key, extra_headers, timeout)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

/// Pulls the first choice's text out of a chat completions body.
fn extract_completion(body: &str) -> Result<String, ChatError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)?;

    let choice = parsed
        .choices
        .and_then(|choices| choices.into_iter().next())
        .ok_or_else(|| ChatError::Api("No choices in API response".to_string()))?;

    choice
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| ChatError::Api("No content in API response".to_string()))
}

#[async_trait::async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, ChatError> {
        let payload = ChatCompletionRequest {
            model,
            messages: messages
                .iter()
                .map(|m| ChatCompletionMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        let response = self.client.post("chat/completions", &payload).await?;
        let body = response.text().await?;
        extract_completion(&body)
    }
}
