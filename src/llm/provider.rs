// AgriMind: AI gateway client
// Posts OpenAI-compatible chat-completion requests to the configured
// gateway with a bounded timeout and retry on transient failures.

use super::retry::{ErrorKind, RetryConfig};
use super::{ChatRequest, Oracle};
use crate::config::OracleConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Message role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: &str) -> Self {
        Self {
            role: Role::System,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }
}

/// Gateway response after extraction.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// HTTP client for the AI gateway.
pub struct GatewayOracle {
    client: Client,
    config: OracleConfig,
    retry: RetryConfig,
}

impl GatewayOracle {
    pub fn new(config: OracleConfig) -> Result<Self> {
        Self::with_retry(config, RetryConfig::default())
    }

    pub fn with_retry(config: OracleConfig, retry: RetryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            retry,
        })
    }

    async fn call_gateway(&self, request: &ChatRequest) -> Result<LlmResponse> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let body = ChatCompletionBody {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(&request.system),
                Message::user(&request.user),
            ],
            temperature: request.temperature,
        };

        let mut http = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("AI gateway error {}: {}", status.as_u16(), text));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("AI gateway returned no choices"))?;

        Ok(LlmResponse {
            content,
            model: self.config.model.clone(),
        })
    }
}

#[async_trait]
impl Oracle for GatewayOracle {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..=self.retry.max_retries {
            if attempt > 0 {
                let delay = self.retry.calculate_delay(attempt - 1);
                log::debug!(
                    "Retry attempt {}/{} for AI gateway after {:?}",
                    attempt,
                    self.retry.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
            }

            match self.call_gateway(&request).await {
                Ok(response) => {
                    if attempt > 0 {
                        log::info!("AI gateway succeeded after {} retries", attempt);
                    }
                    return Ok(response.content);
                }
                Err(e) => {
                    let kind = ErrorKind::classify(&e);
                    log::warn!(
                        "AI gateway attempt {}/{} failed ({:?}): {}",
                        attempt + 1,
                        self.retry.max_retries + 1,
                        kind,
                        e
                    );
                    if !kind.should_retry() {
                        return Err(e);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("AI gateway exhausted all retries")))
    }
}
