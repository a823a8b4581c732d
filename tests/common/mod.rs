// Shared test doubles for the agent pipeline.
#![allow(dead_code)]

use agrimind::llm::{ChatRequest, Oracle};
use agrimind::store::{MemoryStore, Store};
use agrimind::types::{
    Alert, ClimateReading, MarketPrice, NewAlert, NewPrediction, PredictionRecord,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;

/// What the scripted oracle does when a rule matches.
#[derive(Clone)]
pub enum Script {
    Reply(String),
    ReplyAfter(String, Duration),
    Fail(String),
}

/// Oracle fake keyed on substrings of the system prompt, so each agent in a
/// multi-agent flow can be scripted independently.
pub struct ScriptedOracle {
    rules: Vec<(String, Script)>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn on(mut self, system_contains: &str, script: Script) -> Self {
        self.rules.push((system_contains.to_string(), script));
        self
    }

    /// Single canned reply for every agent.
    pub fn always(reply: &str) -> Self {
        Self::new().on("", Script::Reply(reply.to_string()))
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        for (needle, script) in &self.rules {
            if request.system.contains(needle) {
                return match script {
                    Script::Reply(text) => Ok(text.clone()),
                    Script::ReplyAfter(text, delay) => {
                        tokio::time::sleep(*delay).await;
                        Ok(text.clone())
                    }
                    Script::Fail(message) => Err(anyhow!(message.clone())),
                };
            }
        }
        Err(anyhow!("no scripted response for system prompt"))
    }
}

// System-prompt fragments identifying each agent.
pub const CLIMATE: &str = "climate prediction AI";
pub const CROP_HEALTH: &str = "crop health AI specialist";
pub const MARKET: &str = "market intelligence AI";
pub const POST_HARVEST: &str = "post-harvest storage expert";
pub const GOVERNMENT: &str = "agricultural policy analyst";

/// Store double where every read and write fails, for exercising the
/// degraded paths.
pub struct BrokenStore;

#[async_trait]
impl Store for BrokenStore {
    async fn recent_climate_readings(
        &self,
        _region: &str,
        _limit: usize,
    ) -> Result<Vec<ClimateReading>> {
        Err(anyhow!("store offline"))
    }

    async fn latest_climate_reading(&self, _region: &str) -> Result<Option<ClimateReading>> {
        Err(anyhow!("store offline"))
    }

    async fn recent_market_prices(
        &self,
        _commodity: Option<&str>,
        _limit: usize,
    ) -> Result<Vec<MarketPrice>> {
        Err(anyhow!("store offline"))
    }

    async fn recent_predictions(&self, _limit: usize) -> Result<Vec<PredictionRecord>> {
        Err(anyhow!("store offline"))
    }

    async fn active_alerts(&self) -> Result<Vec<Alert>> {
        Err(anyhow!("store offline"))
    }

    async fn insert_prediction(&self, _new: NewPrediction) -> Result<PredictionRecord> {
        Err(anyhow!("store offline"))
    }

    async fn insert_alert(&self, _new: NewAlert) -> Result<Alert> {
        Err(anyhow!("store offline"))
    }
}

/// Poll the store until a predicate over predictions holds, with a bounded
/// wait; used to observe fire-and-forget dispatch without racing it.
pub async fn wait_for_predictions<F>(store: &MemoryStore, predicate: F) -> Vec<PredictionRecord>
where
    F: Fn(&[PredictionRecord]) -> bool,
{
    for _ in 0..100 {
        let rows = store.predictions();
        if predicate(&rows) {
            return rows;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    store.predictions()
}
