// AgriMind: Injected configuration
// API keys and endpoint URLs are constructed explicitly and handed to the
// runner; nothing reads the environment at call time, so tests can wire in
// fake oracle and store implementations.

use serde::{Deserialize, Serialize};
use std::env;

/// AI gateway configuration (OpenAI-compatible chat completions endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    /// Request timeout; the gateway specifies none upstream, so a bound is
    /// applied here.
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ai.gateway.lovable.dev/v1".to_string(),
            api_key: None,
            model: "google/gemini-2.5-flash".to_string(),
            timeout_secs: 30,
        }
    }
}

impl OracleConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("AI_GATEWAY_URL") {
            config.base_url = url;
        }
        config.api_key = env::var("AI_GATEWAY_API_KEY").ok();
        if let Ok(model) = env::var("AI_GATEWAY_MODEL") {
            config.model = model;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }
}

/// Durable store configuration (PostgREST-style endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    pub service_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            service_key: None,
            timeout_secs: 30,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("STORE_URL").unwrap_or_default(),
            service_key: env::var("STORE_SERVICE_KEY").ok(),
            timeout_secs: 30,
        }
    }

    pub fn new(base_url: &str, service_key: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.map(|k| k.to_string()),
            timeout_secs: 30,
        }
    }
}

/// Top-level configuration handed to the agent runner at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    pub oracle: OracleConfig,
    pub store: StoreConfig,
}

impl SystemConfig {
    pub fn from_env() -> Self {
        Self {
            oracle: OracleConfig::from_env(),
            store: StoreConfig::from_env(),
        }
    }
}
