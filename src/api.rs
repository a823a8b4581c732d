// AgriMind: RPC envelope
// Agents are invoked with a JSON body and answered with a JSON body.
// Success carries the record under the agent's result key; failure carries
// an error string and an HTTP-equivalent status.

use crate::agents::AgentRunner;
use crate::error::AgentError;
use crate::request::AgentRequest;
use crate::types::AgentType;
use serde_json::{json, Value};

/// JSON response plus the HTTP-equivalent status an outer transport should
/// use.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// The key the record is returned under, matching each agent's vocabulary.
fn result_key(agent_type: AgentType) -> &'static str {
    match agent_type {
        AgentType::Climate => "prediction",
        AgentType::CropHealth => "analysis",
        AgentType::Market => "intelligence",
        AgentType::PostHarvest => "analysis",
        AgentType::GovernmentReporting => "report",
    }
}

fn success_message(agent_type: AgentType) -> &'static str {
    match agent_type {
        AgentType::Climate => "Climate prediction generated successfully",
        AgentType::CropHealth => "Crop health analysis completed",
        AgentType::Market => "Market intelligence generated successfully",
        AgentType::PostHarvest => "Post-harvest assessment completed",
        AgentType::GovernmentReporting => "National policy brief generated",
    }
}

fn failure(error: &AgentError) -> ApiResponse {
    ApiResponse {
        status: error.status_code(),
        body: json!({
            "success": false,
            "error": error.to_string(),
        }),
    }
}

/// Run one agent from a raw JSON body.
pub async fn run_agent(runner: &AgentRunner, agent_type: AgentType, body: Value) -> ApiResponse {
    let request: AgentRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => return failure(&AgentError::InvalidRequest(e.to_string())),
    };

    match runner.run(agent_type, request).await {
        Ok(outcome) => ApiResponse {
            status: 200,
            body: json!({
                "success": true,
                result_key(agent_type): outcome.record,
                "message": success_message(agent_type),
            }),
        },
        Err(e) => {
            log::error!("Error in {} agent: {}", agent_type, e);
            failure(&e)
        }
    }
}

/// Route by agent label, for transports that address agents by name.
pub async fn run_agent_by_name(runner: &AgentRunner, name: &str, body: Value) -> ApiResponse {
    match AgentType::parse(name) {
        Some(agent_type) => run_agent(runner, agent_type, body).await,
        None => failure(&AgentError::InvalidRequest(format!(
            "unknown agent: {}",
            name
        ))),
    }
}
