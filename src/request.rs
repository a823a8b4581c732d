// AgriMind: Caller-supplied agent parameters
// All fields are free text; each agent prompt reads the ones it needs.
// Wire format is camelCase, matching the dashboard's request bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentRequest {
    pub region: Option<String>,
    pub location: Option<String>,
    pub crop_type: Option<String>,
    pub storage_type: Option<String>,
    pub commodity: Option<String>,
    pub image_url: Option<String>,
    pub request_type: Option<String>,
    /// Set by the cross-agent dispatcher when this run was triggered by
    /// another agent.
    pub trigger_reason: Option<String>,
}

impl AgentRequest {
    pub fn for_region(region: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            ..Default::default()
        }
    }

    /// The locality this run is about. Region takes precedence over
    /// location; government reports use the national scope.
    pub fn region_or(&self, fallback: &str) -> String {
        self.region
            .clone()
            .or_else(|| self.location.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn crop_type_or(&self, fallback: &str) -> String {
        self.crop_type
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn commodity_or(&self, fallback: &str) -> String {
        self.commodity
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}
