// AgriMind: Multi-Agent Agricultural Intelligence Core
// Five prediction agents (climate, crop-health, market, post-harvest,
// government-reporting) that turn an AI gateway call into a stored,
// schema-typed prediction and escalate high-risk results.

pub mod config;
pub mod error;
pub mod types;
pub mod request;

// LLM abstraction layer - gateway client with retry
pub mod llm;

// Response normalization - untrusted model text into schema-shaped payloads
pub mod normalize;

// Escalation policy + cross-agent trigger dispatch
pub mod escalation;
pub mod dispatch;

// Durable store surface (REST client + in-memory test store)
pub mod store;

// Agent system - per-agent profiles and the generic runner
pub mod agents;

// RPC-style envelope for external callers
pub mod api;

// Aggregation view consumed by the dashboard
pub mod dashboard;

// Re-export the core surface
pub use config::{OracleConfig, StoreConfig, SystemConfig};
pub use error::AgentError;
pub use types::{
    AgentType, Alert, AlertSeverity, NewAlert, NewPrediction, PredictionPayload, PredictionRecord,
    RiskLevel,
};
pub use request::AgentRequest;
pub use agents::{Agent, AgentOutcome, AgentRunner};
pub use escalation::{decide, EscalationActions};
pub use llm::{ChatRequest, GatewayOracle, Oracle};
pub use store::{MemoryStore, RestStore, Store};
