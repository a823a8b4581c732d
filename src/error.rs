// AgriMind: Error taxonomy
// Only OracleUnavailable propagates to callers; store and downstream-trigger
// failures are logged at their seam and absorbed with a best-effort result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// The AI gateway call failed or returned a non-success response.
    /// Fatal to the invocation.
    #[error("AI oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// The RPC body could not be deserialized into an agent request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AgentError {
    /// HTTP-equivalent status code for the RPC envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            AgentError::OracleUnavailable(_) => 500,
            AgentError::InvalidRequest(_) => 400,
        }
    }
}
