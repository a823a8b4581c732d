// AgriMind: Climate agent
// Per-region climate risk prediction from recent readings. High or
// critical risk escalates to the post-harvest agent and a climate alert.

use super::{read_or_default, Agent, AgentContext};
use crate::normalize::normalize;
use crate::request::AgentRequest;
use crate::store::Store;
use crate::types::{AgentType, ClimateOutlook, PredictionPayload, RiskLevel};
use async_trait::async_trait;

pub struct ClimateAgent;

#[async_trait]
impl Agent for ClimateAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::Climate
    }

    fn name(&self) -> &str {
        "Climate"
    }

    fn system_prompt(&self) -> &str {
        "You are an agricultural climate prediction AI. Always respond with valid JSON."
    }

    fn temperature(&self) -> f32 {
        0.7
    }

    async fn gather_context(&self, store: &dyn Store, request: &AgentRequest) -> AgentContext {
        let region = request.region_or("Unknown");
        AgentContext {
            climate_readings: read_or_default(
                self.name(),
                "recent climate data",
                store.recent_climate_readings(&region, 5).await,
            ),
            ..Default::default()
        }
    }

    fn build_prompt(&self, request: &AgentRequest, ctx: &AgentContext) -> String {
        let readings = serde_json::to_string(&ctx.climate_readings)
            .unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"You are a climate prediction AI agent for agriculture in Kenya.

Region: {region}
Recent Climate Data: {readings}

Provide:
- risk_level (low|medium|high|critical)
- rainfall_forecast
- temperature_trend
- recommendations[]
- warnings[]
- summary

Respond in JSON ONLY."#,
            region = request.region_or("Unknown"),
            readings = readings,
        )
    }

    fn normalize(&self, raw: &str) -> PredictionPayload {
        PredictionPayload::Climate(normalize::<ClimateOutlook>(raw))
    }

    fn risk_level(&self, payload: &PredictionPayload, _ctx: &AgentContext) -> RiskLevel {
        match payload {
            PredictionPayload::Climate(outlook) => outlook.risk_level,
            _ => RiskLevel::Medium,
        }
    }

    fn ttl(&self) -> Option<chrono::Duration> {
        Some(chrono::Duration::days(7))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_region_and_schema() {
        let prompt = ClimateAgent.build_prompt(
            &AgentRequest::for_region("Kiambu"),
            &AgentContext::default(),
        );
        assert!(prompt.contains("Region: Kiambu"));
        assert!(prompt.contains("risk_level"));
        assert!(prompt.contains("JSON ONLY"));
    }

    #[test]
    fn risk_comes_from_payload() {
        let payload = ClimateAgent.normalize(r#"{"risk_level":"critical","summary":"Storm"}"#);
        assert_eq!(
            ClimateAgent.risk_level(&payload, &AgentContext::default()),
            RiskLevel::Critical
        );
    }
}
