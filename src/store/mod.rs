// AgriMind: Durable store surface
// The store is an external table service consumed through typed reads and
// writes. Runners treat every failure here as non-fatal: reads degrade to
// empty context, writes degrade to an unpersisted best-effort result.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use crate::types::{
    Alert, ClimateReading, MarketPrice, NewAlert, NewPrediction, PredictionRecord,
};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Most recent climate readings for a region, newest first.
    async fn recent_climate_readings(
        &self,
        region: &str,
        limit: usize,
    ) -> Result<Vec<ClimateReading>>;

    /// Single latest climate reading for a region.
    async fn latest_climate_reading(&self, region: &str) -> Result<Option<ClimateReading>>;

    /// Most recent market prices, newest first, optionally filtered by
    /// commodity.
    async fn recent_market_prices(
        &self,
        commodity: Option<&str>,
        limit: usize,
    ) -> Result<Vec<MarketPrice>>;

    /// Most recent predictions across all agents, newest first.
    async fn recent_predictions(&self, limit: usize) -> Result<Vec<PredictionRecord>>;

    /// All currently active alerts.
    async fn active_alerts(&self) -> Result<Vec<Alert>>;

    /// Count of currently active alerts.
    async fn active_alert_count(&self) -> Result<u64> {
        Ok(self.active_alerts().await?.len() as u64)
    }

    /// Insert a prediction; the store assigns id and created_at.
    async fn insert_prediction(&self, new: NewPrediction) -> Result<PredictionRecord>;

    /// Insert an alert; the store assigns id, created_at and is_active.
    async fn insert_alert(&self, new: NewAlert) -> Result<Alert>;
}
