// AgriMind: In-memory store
// Backs the test suite and local experimentation. Assigns ids and
// timestamps the way the REST store's backend would.

use super::Store;
use crate::types::{
    Alert, ClimateReading, MarketPrice, NewAlert, NewPrediction, PredictionRecord,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    predictions: Mutex<Vec<PredictionRecord>>,
    alerts: Mutex<Vec<Alert>>,
    climate: Mutex<Vec<ClimateReading>>,
    market: Mutex<Vec<MarketPrice>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a climate reading (test fixture path).
    pub fn push_climate_reading(&self, reading: ClimateReading) {
        self.climate.lock().unwrap().push(reading);
    }

    /// Seed a market price (test fixture path).
    pub fn push_market_price(&self, price: MarketPrice) {
        self.market.lock().unwrap().push(price);
    }

    /// Snapshot of all stored predictions, newest first.
    pub fn predictions(&self) -> Vec<PredictionRecord> {
        let mut rows = self.predictions.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    /// Snapshot of all stored alerts.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    /// Resolve an alert (the external resolution action; out of core scope
    /// but needed to exercise active-alert filtering).
    pub fn resolve_alert(&self, id: &str) {
        let mut alerts = self.alerts.lock().unwrap();
        if let Some(alert) = alerts.iter_mut().find(|a| a.id == id) {
            alert.is_active = false;
            alert.resolved_at = Some(Utc::now());
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn recent_climate_readings(
        &self,
        region: &str,
        limit: usize,
    ) -> Result<Vec<ClimateReading>> {
        let mut rows: Vec<ClimateReading> = self
            .climate
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.region == region)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        rows.truncate(limit);
        Ok(rows)
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
        let mut rows: Vec<MarketPrice> = self
            .market
            .lock()
            .unwrap()
            .iter()
            .filter(|p| commodity.map_or(true, |c| p.commodity == c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn recent_predictions(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        let mut rows = self.predictions();
        rows.truncate(limit);
        Ok(rows)
    }

    async fn active_alerts(&self) -> Result<Vec<Alert>> {
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.is_active)
            .cloned()
            .collect())
    }

    async fn insert_prediction(&self, new: NewPrediction) -> Result<PredictionRecord> {
        let record = PredictionRecord {
            id: Uuid::new_v4().to_string(),
            agent_type: new.agent_type,
            region: new.region,
            risk_level: new.risk_level,
            payload: new.payload,
            created_at: Utc::now(),
            expires_at: new.expires_at,
        };
        self.predictions.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn insert_alert(&self, new: NewAlert) -> Result<Alert> {
        let alert = Alert {
            id: Uuid::new_v4().to_string(),
            alert_type: new.alert_type,
            severity: new.severity,
            location: new.location,
            message: new.message,
            details: new.details,
            is_active: true,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(alert)
    }
}
