// AgriMind: Aggregation view
// Computes the per-agent display state the dashboard needs from the most
// recent predictions and the active alert count. Read-only; expiry is not
// enforced here (stale records still count, staleness is advisory).

use crate::types::{AgentType, PredictionRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display state for one agent card.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatus {
    pub agent_type: AgentType,
    pub display_name: &'static str,
    /// What the count represents for this agent (predictions, alerts,
    /// warnings, insights, reports).
    pub counter_label: &'static str,
    pub count: u64,
    pub last_update: String,
    /// Set on the post-harvest card when its latest record was caused by a
    /// climate trigger.
    pub triggered_by: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub agents: Vec<AgentStatus>,
    pub active_alerts: u64,
}

fn display_name(agent_type: AgentType) -> &'static str {
    match agent_type {
        AgentType::Climate => "Climate Risk Prediction",
        AgentType::CropHealth => "Crop Health Monitor",
        AgentType::PostHarvest => "Post-Harvest Prevention",
        AgentType::Market => "Market Intelligence",
        AgentType::GovernmentReporting => "Government Reporting",
    }
}

fn counter_label(agent_type: AgentType) -> &'static str {
    match agent_type {
        AgentType::Climate => "predictions",
        AgentType::CropHealth => "alerts",
        AgentType::PostHarvest => "warnings",
        AgentType::Market => "insights",
        AgentType::GovernmentReporting => "reports",
    }
}

/// Render a timestamp's age in human terms.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    if seconds < 60 {
        format!("{} sec ago", seconds)
    } else if seconds < 3600 {
        format!("{} min ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else {
        format!("{} days ago", seconds / 86400)
    }
}

/// Build the dashboard snapshot. `predictions` is expected newest first, as
/// the store returns it.
pub fn snapshot(
    predictions: &[PredictionRecord],
    active_alert_count: u64,
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let latest_post_harvest = predictions
        .iter()
        .find(|p| p.agent_type == AgentType::PostHarvest);
    let climate_triggered = latest_post_harvest
        .and_then(|p| p.payload.trigger_reason())
        .map(|reason| reason.contains("Climate Risk"))
        .unwrap_or(false);

    let agents = AgentType::ALL
        .iter()
        .map(|&agent_type| {
            let latest = predictions.iter().find(|p| p.agent_type == agent_type);
            let count = match agent_type {
                // Post-harvest surfaces the live alert volume instead of
                // its own record count
                AgentType::PostHarvest => active_alert_count,
                _ => predictions
                    .iter()
                    .filter(|p| p.agent_type == agent_type)
                    .count() as u64,
            };
            AgentStatus {
                agent_type,
                display_name: display_name(agent_type),
                counter_label: counter_label(agent_type),
                count,
                last_update: latest
                    .map(|p| time_ago(p.created_at, now))
                    .unwrap_or_else(|| "No data".to_string()),
                triggered_by: if agent_type == AgentType::PostHarvest && climate_triggered {
                    Some("Climate Agent")
                } else {
                    None
                },
            }
        })
        .collect();

    DashboardSnapshot {
        agents,
        active_alerts: active_alert_count,
    }
}
