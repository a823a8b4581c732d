// AgriMind: Agent runner
// The shared pipeline around every agent profile: fetch context, prompt the
// oracle, normalize, persist, escalate. Holds no state across invocations;
// all shared state lives in the store.

use super::{profile, AgentContext};
use crate::config::SystemConfig;
use crate::dispatch::{self, AgentInvoker};
use crate::error::AgentError;
use crate::escalation::{decide, EscalationActions};
use crate::llm::{ChatRequest, GatewayOracle, Oracle};
use crate::request::AgentRequest;
use crate::store::{RestStore, Store};
use crate::types::{AgentType, NewAlert, NewPrediction, PredictionRecord};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Result of one agent invocation. The record is always structurally
/// complete; `persisted` is false when the store write failed and the
/// caller is receiving the in-memory result.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub record: PredictionRecord,
    pub persisted: bool,
    pub escalation: EscalationActions,
}

#[derive(Clone)]
pub struct AgentRunner {
    oracle: Arc<dyn Oracle>,
    store: Arc<dyn Store>,
}

impl AgentRunner {
    pub fn new(oracle: Arc<dyn Oracle>, store: Arc<dyn Store>) -> Self {
        Self { oracle, store }
    }

    /// Wire up the production oracle and store clients from injected
    /// configuration.
    pub fn from_config(config: SystemConfig) -> Result<Self, anyhow::Error> {
        let oracle = GatewayOracle::new(config.oracle)?;
        let store = RestStore::new(config.store)?;
        Ok(Self::new(Arc::new(oracle), Arc::new(store)))
    }

    pub fn store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }

    /// Run one agent invocation end to end.
    pub async fn run(
        &self,
        agent_type: AgentType,
        request: AgentRequest,
    ) -> Result<AgentOutcome, AgentError> {
        let agent = profile(agent_type);
        let region = agent.region(&request);
        log::info!("{} agent processing request for {}", agent.name(), region);

        // (a) context; read failures already degraded to empty inside
        let ctx: AgentContext = agent.gather_context(self.store.as_ref(), &request).await;

        // (b)+(c) prompt and oracle call; the only fatal step
        let prompt = agent.build_prompt(&request, &ctx);
        let chat = ChatRequest::new(agent.system_prompt(), &prompt, agent.temperature());
        let raw = self
            .oracle
            .complete(chat)
            .await
            .map_err(|e| AgentError::OracleUnavailable(e.to_string()))?;

        // (d) normalize; never fails, always schema-shaped
        let mut payload = agent.normalize(&raw);
        payload.sanitize();
        agent.finalize(&mut payload, &request);
        let risk_level = agent.risk_level(&payload, &ctx);

        // (e) persist; write failure degrades to an unpersisted result
        let now = Utc::now();
        let expires_at = agent.ttl().map(|ttl| now + ttl);
        let insert = NewPrediction {
            agent_type,
            region: region.clone(),
            risk_level,
            payload: payload.clone(),
            expires_at,
        };
        let (record, persisted) = match self.store.insert_prediction(insert).await {
            Ok(stored) => (stored, true),
            Err(e) => {
                log::error!("Error storing {} prediction: {}", agent.name(), e);
                let local = PredictionRecord {
                    id: Uuid::new_v4().to_string(),
                    agent_type,
                    region: region.clone(),
                    risk_level,
                    payload: payload.clone(),
                    created_at: now,
                    expires_at,
                };
                (local, false)
            }
        };

        // (f) escalation side effects
        let actions = decide(&payload, &request);

        if let Some(draft) = &actions.alert {
            let alert = NewAlert {
                alert_type: draft.alert_type.clone(),
                severity: draft.severity,
                location: region.clone(),
                message: draft.message.clone(),
                details: payload.to_value(),
            };
            if let Err(e) = self.store.insert_alert(alert).await {
                log::error!("Error storing {} alert: {}", agent.name(), e);
            }
        }

        if let Some(trigger) = actions.trigger.clone() {
            // Fire-and-forget; the handle is dropped deliberately
            let invoker: Arc<dyn AgentInvoker> = Arc::new(self.clone());
            dispatch::dispatch(invoker, trigger, &request);
        }

        log::info!(
            "{} prediction completed (risk: {}, persisted: {})",
            agent.name(),
            record.risk_level,
            persisted
        );

        Ok(AgentOutcome {
            record,
            persisted,
            escalation: actions,
        })
    }
}

#[async_trait]
impl AgentInvoker for AgentRunner {
    async fn invoke(&self, agent: AgentType, request: AgentRequest) -> Result<(), AgentError> {
        self.run(agent, request).await.map(|_| ())
    }
}
