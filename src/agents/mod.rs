// AgriMind: Agent system
// One profile per prediction agent. A profile owns its prompt, context
// fetch, output schema and risk derivation; the runner owns the shared
// pipeline around them.

pub mod climate;
pub mod crop_health;
pub mod government;
pub mod market;
pub mod post_harvest;
pub mod runner;

pub use climate::ClimateAgent;
pub use crop_health::CropHealthAgent;
pub use government::GovernmentReportingAgent;
pub use market::MarketAgent;
pub use post_harvest::PostHarvestAgent;
pub use runner::{AgentOutcome, AgentRunner};

use crate::request::AgentRequest;
use crate::store::Store;
use crate::types::{
    AgentType, Alert, ClimateReading, MarketPrice, PredictionPayload, PredictionRecord, RiskLevel,
};
use async_trait::async_trait;

/// Context rows fetched from the store before prompting. Each agent fills
/// only the slices it reads; store failures leave them empty.
#[derive(Debug, Clone, Default)]
pub struct AgentContext {
    pub climate_readings: Vec<ClimateReading>,
    pub latest_reading: Option<ClimateReading>,
    pub market_prices: Vec<MarketPrice>,
    pub recent_predictions: Vec<PredictionRecord>,
    pub active_alerts: Vec<Alert>,
}

/// Base trait for all agents.
#[async_trait]
pub trait Agent: Send + Sync {
    fn agent_type(&self) -> AgentType;

    fn name(&self) -> &str;

    fn system_prompt(&self) -> &str;

    /// Oracle sampling temperature for this agent.
    fn temperature(&self) -> f32 {
        0.7
    }

    /// Fetch context rows. Read failures are logged and degrade to an
    /// empty context; they never fail the run.
    async fn gather_context(&self, _store: &dyn Store, _request: &AgentRequest) -> AgentContext {
        AgentContext::default()
    }

    /// Render the user prompt embedding the fetched context and the output
    /// schema description.
    fn build_prompt(&self, request: &AgentRequest, ctx: &AgentContext) -> String;

    /// Parse raw oracle text into this agent's payload variant. Never
    /// fails; defaults stand in for anything unparsable.
    fn normalize(&self, raw: &str) -> PredictionPayload;

    /// Inject request-derived fields the model does not produce
    /// (commodity, trigger reason).
    fn finalize(&self, _payload: &mut PredictionPayload, _request: &AgentRequest) {}

    /// Derive the record's risk level from the normalized payload.
    fn risk_level(&self, payload: &PredictionPayload, ctx: &AgentContext) -> RiskLevel;

    /// The locality recorded on the prediction.
    fn region(&self, request: &AgentRequest) -> String {
        request.region_or("Unknown")
    }

    /// Record time-to-live; None means the prediction never expires.
    fn ttl(&self) -> Option<chrono::Duration> {
        None
    }
}

/// Look up the profile for an agent type.
pub fn profile(agent_type: AgentType) -> &'static dyn Agent {
    match agent_type {
        AgentType::Climate => &ClimateAgent,
        AgentType::CropHealth => &CropHealthAgent,
        AgentType::Market => &MarketAgent,
        AgentType::PostHarvest => &PostHarvestAgent,
        AgentType::GovernmentReporting => &GovernmentReportingAgent,
    }
}

/// Log a failed context read and fall back to the type's empty value.
pub(crate) fn read_or_default<T: Default>(
    agent: &str,
    what: &str,
    result: anyhow::Result<T>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::warn!("{} agent: failed to fetch {}: {}", agent, what, e);
            T::default()
        }
    }
}
