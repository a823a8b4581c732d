// AgriMind: Domain model
// The payload sum type keyed by agent kind is the backbone of the system:
// the normalizer produces it, the escalation policy matches on it
// exhaustively, and the store persists it inside a PredictionRecord.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The five prediction agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentType {
    #[serde(rename = "climate")]
    Climate,
    #[serde(rename = "crop-health")]
    CropHealth,
    #[serde(rename = "market")]
    Market,
    #[serde(rename = "post-harvest")]
    PostHarvest,
    #[serde(rename = "government-reporting")]
    GovernmentReporting,
}

impl AgentType {
    pub const ALL: [AgentType; 5] = [
        AgentType::Climate,
        AgentType::CropHealth,
        AgentType::Market,
        AgentType::PostHarvest,
        AgentType::GovernmentReporting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Climate => "climate",
            AgentType::CropHealth => "crop-health",
            AgentType::Market => "market",
            AgentType::PostHarvest => "post-harvest",
            AgentType::GovernmentReporting => "government-reporting",
        }
    }

    pub fn parse(s: &str) -> Option<AgentType> {
        match s {
            "climate" => Some(AgentType::Climate),
            "crop-health" => Some(AgentType::CropHealth),
            "market" => Some(AgentType::Market),
            "post-harvest" => Some(AgentType::PostHarvest),
            "government-reporting" => Some(AgentType::GovernmentReporting),
            _ => None,
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level recorded on every prediction.
/// Deserialization is case-insensitive and maps unknown labels to Medium,
/// since the value ultimately comes from untrusted model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Case-insensitive parse; unknown labels fall back to Medium.
    pub fn from_label(label: &str) -> RiskLevel {
        match label.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" | "moderate" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            "critical" => RiskLevel::Critical,
            _ => RiskLevel::Medium,
        }
    }

    /// High and Critical drive the climate escalation rules.
    pub fn is_severe(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        RiskLevel::Medium
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(RiskLevel::from_label(&s))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crop condition reported by the crop-health agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Stressed,
    Diseased,
    Critical,
    Unknown,
}

impl Default for HealthStatus {
    fn default() -> Self {
        HealthStatus::Unknown
    }
}

impl<'de> Deserialize<'de> for HealthStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.trim().to_lowercase().as_str() {
            "healthy" => HealthStatus::Healthy,
            "stressed" => HealthStatus::Stressed,
            "diseased" => HealthStatus::Diseased,
            "critical" => HealthStatus::Critical,
            _ => HealthStatus::Unknown,
        })
    }
}

/// Issue severity reported by the crop-health agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CropSeverity {
    Low,
    Medium,
    High,
}

impl Default for CropSeverity {
    fn default() -> Self {
        CropSeverity::Low
    }
}

impl<'de> Deserialize<'de> for CropSeverity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.trim().to_lowercase().as_str() {
            "medium" | "moderate" => CropSeverity::Medium,
            "high" => CropSeverity::High,
            _ => CropSeverity::Low,
        })
    }
}

/// Price direction reported by the market agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl Default for MarketTrend {
    fn default() -> Self {
        MarketTrend::Stable
    }
}

impl<'de> Deserialize<'de> for MarketTrend {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.trim().to_lowercase().as_str() {
            "increasing" | "rising" | "up" => MarketTrend::Increasing,
            "decreasing" | "falling" | "down" => MarketTrend::Decreasing,
            _ => MarketTrend::Stable,
        })
    }
}

// ---------------------------------------------------------------------------
// Per-agent payload schemas
// ---------------------------------------------------------------------------
// Container-level #[serde(default)] means a successfully parsed object has
// every missing field filled from the schema's default table, and a total
// parse failure falls back to the full default object. Defaults carry the
// conservative middle values and advisory text the normalizer contract
// requires.

/// Climate agent output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateOutlook {
    pub risk_level: RiskLevel,
    pub rainfall_forecast: String,
    pub temperature_trend: String,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: String,
}

impl Default for ClimateOutlook {
    fn default() -> Self {
        Self {
            risk_level: RiskLevel::Medium,
            rainfall_forecast: "Moderate rainfall expected".to_string(),
            temperature_trend: "Stable temperatures".to_string(),
            recommendations: vec!["Monitor weather conditions".to_string()],
            warnings: Vec::new(),
            summary: "Automated climate analysis was unavailable; manual review advised"
                .to_string(),
        }
    }
}

/// Crop-health agent output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropHealthReport {
    pub health_status: HealthStatus,
    pub disease_detected: Option<String>,
    pub pest_detected: Option<String>,
    pub confidence_score: f64,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub severity: CropSeverity,
}

impl Default for CropHealthReport {
    fn default() -> Self {
        Self {
            health_status: HealthStatus::Unknown,
            disease_detected: None,
            pest_detected: None,
            confidence_score: 0.5,
            analysis: "Unable to complete full analysis".to_string(),
            recommendations: vec![
                "Monitor crops regularly".to_string(),
                "Consult with agricultural extension officer".to_string(),
            ],
            severity: CropSeverity::Low,
        }
    }
}

/// Market agent output. `commodity` is injected from the request after
/// normalization, not parsed from model text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketIntelligence {
    pub commodity: String,
    pub trend: MarketTrend,
    pub price_prediction: String,
    pub best_selling_time: String,
    pub supply_analysis: String,
    pub demand_analysis: String,
    pub opportunities: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: f64,
}

impl Default for MarketIntelligence {
    fn default() -> Self {
        Self {
            commodity: String::new(),
            trend: MarketTrend::Stable,
            price_prediction: "Prices expected to remain stable".to_string(),
            best_selling_time: "Monitor market for optimal timing".to_string(),
            supply_analysis: "Current supply levels moderate".to_string(),
            demand_analysis: "Demand is consistent".to_string(),
            opportunities: vec!["Regular market monitoring recommended".to_string()],
            recommendations: vec![
                "Track price changes".to_string(),
                "Consider storage options".to_string(),
            ],
            confidence: 0.6,
        }
    }
}

/// Post-harvest agent output. `risk` stays a free string because the model
/// answers with arbitrary casing ("High", "low"); consumers compare it
/// case-insensitively. `trigger_reason` is present when the run was caused
/// by a cross-agent trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageAssessment {
    pub risk: String,
    pub safe_days: i64,
    pub warnings: Vec<String>,
    pub logistics_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_reason: Option<String>,
}

impl Default for StorageAssessment {
    fn default() -> Self {
        Self {
            risk: "Medium".to_string(),
            safe_days: 7,
            warnings: Vec::new(),
            logistics_action: "Automated assessment unavailable; inspect storage manually"
                .to_string(),
            trigger_reason: None,
        }
    }
}

/// Government-reporting agent output (national policy brief).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyBrief {
    pub executive_summary: String,
    pub critical_risks: Vec<String>,
    pub regional_hotspots: Vec<String>,
    pub recommended_interventions: Vec<String>,
    pub economic_impact_estimate: String,
}

impl Default for PolicyBrief {
    fn default() -> Self {
        Self {
            executive_summary: "Automated reporting was unavailable; manual review advised"
                .to_string(),
            critical_risks: Vec::new(),
            regional_hotspots: Vec::new(),
            recommended_interventions: Vec::new(),
            economic_impact_estimate: "Unknown".to_string(),
        }
    }
}

/// Tagged union of all agent payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "kebab-case")]
pub enum PredictionPayload {
    Climate(ClimateOutlook),
    CropHealth(CropHealthReport),
    Market(MarketIntelligence),
    PostHarvest(StorageAssessment),
    GovernmentReport(PolicyBrief),
}

impl PredictionPayload {
    /// Clamp numeric fields the model is known to overshoot.
    pub fn sanitize(&mut self) {
        match self {
            PredictionPayload::CropHealth(report) => {
                report.confidence_score = report.confidence_score.clamp(0.0, 1.0);
            }
            PredictionPayload::Market(intel) => {
                intel.confidence = intel.confidence.clamp(0.0, 1.0);
            }
            _ => {}
        }
    }

    /// Causal reason string when this payload came from a cross-agent trigger.
    pub fn trigger_reason(&self) -> Option<&str> {
        match self {
            PredictionPayload::PostHarvest(assessment) => assessment.trigger_reason.as_deref(),
            _ => None,
        }
    }

    /// Full payload JSON, used for alert details and persistence.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Stored entities
// ---------------------------------------------------------------------------

/// The durable result of one agent invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    pub agent_type: AgentType,
    pub region: String,
    pub risk_level: RiskLevel,
    pub payload: PredictionPayload,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl PredictionRecord {
    /// Staleness is advisory; nothing deletes expired records.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(t) if t <= now)
    }
}

/// A prediction awaiting insertion; the store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub agent_type: AgentType,
    pub region: String,
    pub risk_level: RiskLevel,
    pub payload: PredictionPayload,
    pub expires_at: Option<DateTime<Utc>>,
}

/// An active or resolved user-facing alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub location: String,
    pub message: String,
    pub details: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// An alert awaiting insertion; the store assigns id, created_at and
/// is_active (true).
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub location: String,
    pub message: String,
    pub details: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Context rows read by agents
// ---------------------------------------------------------------------------

/// A sensor/observation row from the climate_data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateReading {
    pub region: String,
    pub temperature: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub rainfall_mm: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

/// An observed commodity price from the market_prices table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPrice {
    pub commodity: String,
    pub market_location: String,
    pub price_per_kg: f64,
    pub currency: String,
    pub price_trend: Option<String>,
    pub supply_level: Option<String>,
    pub demand_level: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
