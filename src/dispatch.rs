// AgriMind: Cross-Agent Trigger Dispatcher
// Fire-and-forget: the originating runner returns without awaiting the
// downstream run, and any downstream failure is logged, never propagated.
// The climate agent's caller must not be delayed or failed by post-harvest
// unavailability.

use crate::error::AgentError;
use crate::escalation::CrossAgentTrigger;
use crate::request::AgentRequest;
use crate::types::AgentType;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Anything that can run an agent. Implemented by AgentRunner; test doubles
/// stand in to observe dispatch behavior.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, agent: AgentType, request: AgentRequest) -> Result<(), AgentError>;
}

/// Build the downstream request a trigger carries. Crop and storage type
/// default to the staple collaboration payload when the originating caller
/// did not supply them.
pub fn trigger_request(trigger: &CrossAgentTrigger, origin: &AgentRequest) -> AgentRequest {
    AgentRequest {
        region: Some(origin.region_or("Unknown")),
        crop_type: Some(origin.crop_type_or("Maize")),
        storage_type: Some(
            origin
                .storage_type
                .clone()
                .unwrap_or_else(|| "Silo".to_string()),
        ),
        trigger_reason: Some(trigger.reason.clone()),
        ..Default::default()
    }
}

/// Spawn the downstream invocation on the runtime and return immediately.
/// The handle is returned for tests; production callers drop it.
pub fn dispatch(
    invoker: Arc<dyn AgentInvoker>,
    trigger: CrossAgentTrigger,
    origin: &AgentRequest,
) -> JoinHandle<()> {
    let request = trigger_request(&trigger, origin);
    let target = trigger.target;
    log::info!(
        "Dispatching cross-agent trigger to {} ({})",
        target,
        trigger.reason
    );

    tokio::spawn(async move {
        if let Err(e) = invoker.invoke(target, request).await {
            log::error!("Cross-agent trigger to {} failed: {}", target, e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingInvoker {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AgentInvoker for FailingInvoker {
        async fn invoke(&self, _agent: AgentType, _request: AgentRequest) -> Result<(), AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AgentError::OracleUnavailable("downstream offline".to_string()))
        }
    }

    #[tokio::test]
    async fn downstream_failure_is_swallowed() {
        let invoker = Arc::new(FailingInvoker {
            calls: AtomicUsize::new(0),
        });
        let trigger = CrossAgentTrigger {
            target: AgentType::PostHarvest,
            reason: "Climate Risk: storm".to_string(),
        };

        let handle = dispatch(invoker.clone(), trigger, &AgentRequest::for_region("Nakuru"));
        handle.await.expect("dispatch task must not panic");
        assert_eq!(invoker.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn trigger_request_carries_reason_and_defaults() {
        let trigger = CrossAgentTrigger {
            target: AgentType::PostHarvest,
            reason: "Climate Risk: Flash flood warning".to_string(),
        };
        let request = trigger_request(&trigger, &AgentRequest::for_region("Kiambu"));
        assert_eq!(request.region.as_deref(), Some("Kiambu"));
        assert_eq!(request.crop_type.as_deref(), Some("Maize"));
        assert_eq!(request.storage_type.as_deref(), Some("Silo"));
        assert!(request
            .trigger_reason
            .as_deref()
            .unwrap()
            .contains("Flash flood warning"));
    }
}
