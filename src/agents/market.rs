// AgriMind: Market intelligence agent
// Commodity trend analysis over recent price rows. An increasing trend
// with confidence above 0.7 emits an info alert.

use super::{read_or_default, Agent, AgentContext};
use crate::normalize::normalize;
use crate::request::AgentRequest;
use crate::store::Store;
use crate::types::{AgentType, MarketIntelligence, MarketTrend, PredictionPayload, RiskLevel};
use async_trait::async_trait;

pub struct MarketAgent;

#[async_trait]
impl Agent for MarketAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::Market
    }

    fn name(&self) -> &str {
        "Market"
    }

    fn system_prompt(&self) -> &str {
        "You are a market intelligence AI for agriculture. Always respond with valid JSON."
    }

    fn temperature(&self) -> f32 {
        0.6
    }

    async fn gather_context(&self, store: &dyn Store, request: &AgentRequest) -> AgentContext {
        let commodity = request.commodity_or("Maize");
        AgentContext {
            market_prices: read_or_default(
                self.name(),
                "recent market data",
                store.recent_market_prices(Some(&commodity), 10).await,
            ),
            ..Default::default()
        }
    }

    fn build_prompt(&self, request: &AgentRequest, ctx: &AgentContext) -> String {
        let prices =
            serde_json::to_string(&ctx.market_prices).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"You are a market intelligence AI agent for agricultural commodities in Kenya.

Commodity: {commodity}
Location: {location}
Recent Price Data: {prices}

Analyze and provide:
1. Current market trend (increasing, stable, decreasing)
2. Price prediction for next 7 days
3. Best selling timing recommendation
4. Supply and demand analysis
5. Market opportunities

Respond in JSON format:
{{
  "trend": "increasing|stable|decreasing",
  "price_prediction": "description",
  "best_selling_time": "timing recommendation",
  "supply_analysis": "current supply situation",
  "demand_analysis": "current demand situation",
  "opportunities": ["opportunity1", "opportunity2"],
  "recommendations": ["recommendation1", "recommendation2"],
  "confidence": 0.85
}}"#,
            commodity = request.commodity_or("Maize"),
            location = request.region_or("Unknown"),
            prices = prices,
        )
    }

    fn normalize(&self, raw: &str) -> PredictionPayload {
        PredictionPayload::Market(normalize::<MarketIntelligence>(raw))
    }

    fn finalize(&self, payload: &mut PredictionPayload, request: &AgentRequest) {
        if let PredictionPayload::Market(intel) = payload {
            intel.commodity = request.commodity_or("Maize");
        }
    }

    fn risk_level(&self, payload: &PredictionPayload, _ctx: &AgentContext) -> RiskLevel {
        match payload {
            PredictionPayload::Market(intel) if intel.trend == MarketTrend::Decreasing => {
                RiskLevel::Medium
            }
            _ => RiskLevel::Low,
        }
    }

    fn ttl(&self) -> Option<chrono::Duration> {
        Some(chrono::Duration::days(7))
    }
}
