// AgriMind: REST store client
// Talks to a PostgREST-style table service: filter/order/limit query
// parameters on reads, POST with Prefer: return=representation on writes.

use super::Store;
use crate::config::StoreConfig;
use crate::types::{
    AgentType, Alert, AlertSeverity, ClimateReading, ClimateOutlook, CropHealthReport,
    MarketIntelligence, MarketPrice, NewAlert, NewPrediction, PolicyBrief, PredictionPayload,
    PredictionRecord, RiskLevel, StorageAssessment,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub struct RestStore {
    client: Client,
    config: StoreConfig,
}

#[derive(Debug, Serialize)]
struct PredictionInsert {
    agent_type: AgentType,
    region: String,
    risk_level: RiskLevel,
    prediction_data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PredictionRow {
    id: String,
    agent_type: AgentType,
    region: String,
    risk_level: RiskLevel,
    prediction_data: Value,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct AlertInsert {
    alert_type: String,
    severity: AlertSeverity,
    location: String,
    message: String,
    details: Value,
}

#[derive(Debug, Deserialize)]
struct AlertRow {
    id: String,
    alert_type: String,
    severity: AlertSeverity,
    location: String,
    message: String,
    #[serde(default)]
    details: Value,
    is_active: bool,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.service_key {
            Some(key) => builder.header("apikey", key).bearer_auth(key),
            None => builder,
        }
    }

    async fn select<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self
            .authed(self.client.get(self.table_url(table)).query(query))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "store select on {} failed ({}): {}",
                table,
                status.as_u16(),
                text
            ));
        }
        Ok(response.json().await?)
    }

    async fn insert<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "store insert on {} failed ({}): {}",
                table,
                status.as_u16(),
                text
            ));
        }
        // PostgREST returns the representation as a one-element array
        let mut rows: Vec<T> = response.json().await?;
        rows.pop()
            .ok_or_else(|| anyhow!("store insert on {} returned no representation", table))
    }
}

/// Rebuild the tagged payload from a stored prediction_data column. Rows
/// written before the schema tag existed are decoded through the agent's
/// schema defaults.
fn payload_from_row(agent_type: AgentType, data: Value) -> PredictionPayload {
    if let Ok(payload) = serde_json::from_value::<PredictionPayload>(data.clone()) {
        return payload;
    }
    match agent_type {
        AgentType::Climate => {
            PredictionPayload::Climate(serde_json::from_value::<ClimateOutlook>(data).unwrap_or_default())
        }
        AgentType::CropHealth => PredictionPayload::CropHealth(
            serde_json::from_value::<CropHealthReport>(data).unwrap_or_default(),
        ),
        AgentType::Market => PredictionPayload::Market(
            serde_json::from_value::<MarketIntelligence>(data).unwrap_or_default(),
        ),
        AgentType::PostHarvest => PredictionPayload::PostHarvest(
            serde_json::from_value::<StorageAssessment>(data).unwrap_or_default(),
        ),
        AgentType::GovernmentReporting => PredictionPayload::GovernmentReport(
            serde_json::from_value::<PolicyBrief>(data).unwrap_or_default(),
        ),
    }
}

impl From<PredictionRow> for PredictionRecord {
    fn from(row: PredictionRow) -> Self {
        let payload = payload_from_row(row.agent_type, row.prediction_data);
        PredictionRecord {
            id: row.id,
            agent_type: row.agent_type,
            region: row.region,
            risk_level: row.risk_level,
            payload,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

impl From<AlertRow> for Alert {
    fn from(row: AlertRow) -> Self {
        Alert {
            id: row.id,
            alert_type: row.alert_type,
            severity: row.severity,
            location: row.location,
            message: row.message,
            details: row.details,
            is_active: row.is_active,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
        }
    }
}

#[async_trait]
impl Store for RestStore {
    async fn recent_climate_readings(
        &self,
        region: &str,
        limit: usize,
    ) -> Result<Vec<ClimateReading>> {
        self.select(
            "climate_data",
            &[
                ("select", "*".to_string()),
                ("region", format!("eq.{}", region)),
                ("order", "recorded_at.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn latest_climate_reading(&self, region: &str) -> Result<Option<ClimateReading>> {
        Ok(self
            .recent_climate_readings(region, 1)
            .await?
            .into_iter()
            .next())
    }

    async fn recent_market_prices(
        &self,
        commodity: Option<&str>,
        limit: usize,
    ) -> Result<Vec<MarketPrice>> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "recorded_at.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(commodity) = commodity {
            query.push(("commodity", format!("eq.{}", commodity)));
        }
        self.select("market_prices", &query).await
    }

    async fn recent_predictions(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        let rows: Vec<PredictionRow> = self
            .select(
                "agent_predictions",
                &[
                    ("select", "*".to_string()),
                    ("order", "created_at.desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(PredictionRecord::from).collect())
    }

    async fn active_alerts(&self) -> Result<Vec<Alert>> {
        let rows: Vec<AlertRow> = self
            .select(
                "alerts",
                &[
                    ("select", "*".to_string()),
                    ("is_active", "eq.true".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Alert::from).collect())
    }

    async fn insert_prediction(&self, new: NewPrediction) -> Result<PredictionRecord> {
        let body = PredictionInsert {
            agent_type: new.agent_type,
            region: new.region,
            risk_level: new.risk_level,
            prediction_data: new.payload.to_value(),
            expires_at: new.expires_at,
        };
        let row: PredictionRow = self.insert("agent_predictions", &body).await?;
        Ok(row.into())
    }

    async fn insert_alert(&self, new: NewAlert) -> Result<Alert> {
        let body = AlertInsert {
            alert_type: new.alert_type,
            severity: new.severity,
            location: new.location,
            message: new.message,
            details: new.details,
        };
        let row: AlertRow = self.insert("alerts", &body).await?;
        Ok(row.into())
    }
}
