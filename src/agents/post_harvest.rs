// AgriMind: Post-harvest agent
// Spoilage risk for stored produce, conditioned on the latest climate
// reading. Usually invoked by the climate agent's cross-agent trigger; the
// trigger reason is carried into the persisted payload.

use super::{read_or_default, Agent, AgentContext};
use crate::normalize::normalize;
use crate::request::AgentRequest;
use crate::store::Store;
use crate::types::{AgentType, PredictionPayload, RiskLevel, StorageAssessment};
use async_trait::async_trait;

pub struct PostHarvestAgent;

#[async_trait]
impl Agent for PostHarvestAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::PostHarvest
    }

    fn name(&self) -> &str {
        "PostHarvest"
    }

    fn system_prompt(&self) -> &str {
        "You are a post-harvest storage expert. Always respond with valid JSON."
    }

    async fn gather_context(&self, store: &dyn Store, request: &AgentRequest) -> AgentContext {
        let region = request.region_or("Unknown");
        AgentContext {
            latest_reading: read_or_default(
                self.name(),
                "latest climate reading",
                store.latest_climate_reading(&region).await,
            ),
            ..Default::default()
        }
    }

    fn build_prompt(&self, request: &AgentRequest, ctx: &AgentContext) -> String {
        let (temperature, humidity) = match &ctx.latest_reading {
            Some(reading) => (
                reading
                    .temperature
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                reading
                    .humidity_percent
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            None => ("unknown".to_string(), "unknown".to_string()),
        };
        format!(
            r#"Analyze post-harvest risk for {crop} stored using {storage} storage in {region}.

Current Conditions:
- Temperature: {temperature}C
- Humidity: {humidity}%

Provide:
1. Spoilage Risk (Low/Medium/High)
2. Estimated Safe Storage Time (days)
3. Specific moisture/pest warnings
4. Logistics recommendation ("Move to cold chain", "Sell immediately", etc.)

Respond ONLY in JSON:
{{
  "risk": "High",
  "safe_days": 5,
  "warnings": [],
  "logistics_action": ""
}}"#,
            crop = request.crop_type_or("crops"),
            storage = request
                .storage_type
                .as_deref()
                .unwrap_or("general"),
            region = request.region_or("Unknown"),
            temperature = temperature,
            humidity = humidity,
        )
    }

    fn normalize(&self, raw: &str) -> PredictionPayload {
        PredictionPayload::PostHarvest(normalize::<StorageAssessment>(raw))
    }

    fn finalize(&self, payload: &mut PredictionPayload, request: &AgentRequest) {
        if let PredictionPayload::PostHarvest(assessment) = payload {
            assessment.trigger_reason = request.trigger_reason.clone();
        }
    }

    fn risk_level(&self, payload: &PredictionPayload, _ctx: &AgentContext) -> RiskLevel {
        match payload {
            PredictionPayload::PostHarvest(assessment) => RiskLevel::from_label(&assessment.risk),
            _ => RiskLevel::Medium,
        }
    }
}
