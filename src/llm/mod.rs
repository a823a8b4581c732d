// AgriMind: LLM abstraction layer
// The oracle is an untrusted, non-deterministic text generator reached over
// an OpenAI-compatible gateway. The trait seam keeps runners testable with
// scripted fakes.

pub mod provider;
pub mod retry;

pub use provider::{GatewayOracle, LlmResponse, Message, Role};
pub use retry::{ErrorKind, RetryConfig};

use async_trait::async_trait;

/// One chat completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(system: &str, user: &str, temperature: f32) -> Self {
        Self {
            system: system.to_string(),
            user: user.to_string(),
            temperature,
        }
    }
}

/// Text-completion oracle consumed by the agent runner.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, anyhow::Error>;
}
