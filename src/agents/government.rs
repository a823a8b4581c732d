// AgriMind: Government-reporting agent
// Aggregates active alerts, recent predictions and market rows into a
// national policy brief. Never escalates; its risk level reflects alert
// volume and is recorded for the dashboard.

use super::{read_or_default, Agent, AgentContext};
use crate::normalize::normalize;
use crate::request::AgentRequest;
use crate::store::Store;
use crate::types::{AgentType, PolicyBrief, PredictionPayload, RiskLevel};
use async_trait::async_trait;

/// Active-alert count above which the national report is flagged high risk.
const HIGH_RISK_ALERT_THRESHOLD: usize = 5;

pub struct GovernmentReportingAgent;

#[async_trait]
impl Agent for GovernmentReportingAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::GovernmentReporting
    }

    fn name(&self) -> &str {
        "GovernmentReporting"
    }

    fn system_prompt(&self) -> &str {
        "You are a senior agricultural policy analyst. Always respond with valid JSON."
    }

    async fn gather_context(&self, store: &dyn Store, _request: &AgentRequest) -> AgentContext {
        AgentContext {
            active_alerts: read_or_default(
                self.name(),
                "active alerts",
                store.active_alerts().await,
            ),
            recent_predictions: read_or_default(
                self.name(),
                "recent predictions",
                store.recent_predictions(10).await,
            ),
            market_prices: read_or_default(
                self.name(),
                "recent market prices",
                store.recent_market_prices(None, 10).await,
            ),
            ..Default::default()
        }
    }

    fn build_prompt(&self, _request: &AgentRequest, ctx: &AgentContext) -> String {
        let critical_alerts = ctx
            .active_alerts
            .iter()
            .filter(|a| a.severity == crate::types::AlertSeverity::Critical)
            .count();
        let market = serde_json::to_string(&ctx.market_prices).unwrap_or_else(|_| "[]".to_string());
        let predictions =
            serde_json::to_string(&ctx.recent_predictions).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"Generate a "National Food Security Policy Brief" for the Ministry of Agriculture, Kenya.

Use the following system data:

Active Alerts: {active}
Critical Alerts: {critical}
Market Prices: {market}
Predictive Analytics: {predictions}

Structure the result strictly as valid JSON:
{{
  "executive_summary": "",
  "critical_risks": [],
  "regional_hotspots": [],
  "recommended_interventions": [],
  "economic_impact_estimate": ""
}}"#,
            active = ctx.active_alerts.len(),
            critical = critical_alerts,
            market = market,
            predictions = predictions,
        )
    }

    fn normalize(&self, raw: &str) -> PredictionPayload {
        PredictionPayload::GovernmentReport(normalize::<PolicyBrief>(raw))
    }

    fn risk_level(&self, _payload: &PredictionPayload, ctx: &AgentContext) -> RiskLevel {
        if ctx.active_alerts.len() > HIGH_RISK_ALERT_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    fn region(&self, _request: &AgentRequest) -> String {
        "National".to_string()
    }
}
