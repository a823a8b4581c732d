// AgriMind: Escalation Policy
// Pure decision function mapping a normalized prediction to its side
// effects: a cross-agent trigger, a user-facing alert, both, or neither.
// Rules are evaluated independently; determinism is load-bearing (the
// runner may be invoked concurrently for the same region).

use crate::request::AgentRequest;
use crate::types::{
    AgentType, AlertSeverity, CropSeverity, HealthStatus, MarketTrend, PredictionPayload,
    RiskLevel,
};

/// A fire-and-forget invocation of another agent.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossAgentTrigger {
    pub target: AgentType,
    pub reason: String,
}

/// An alert the runner should persist. Location and full payload details
/// are attached at write time.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDraft {
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Zero or more side effects demanded by a prediction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EscalationActions {
    pub trigger: Option<CrossAgentTrigger>,
    pub alert: Option<AlertDraft>,
}

impl EscalationActions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.trigger.is_none() && self.alert.is_none()
    }
}

/// Decide which side effects a normalized payload demands.
pub fn decide(payload: &PredictionPayload, request: &AgentRequest) -> EscalationActions {
    match payload {
        PredictionPayload::Climate(outlook) => {
            if !outlook.risk_level.is_severe() {
                return EscalationActions::none();
            }
            EscalationActions {
                trigger: Some(CrossAgentTrigger {
                    target: AgentType::PostHarvest,
                    reason: format!("Climate Risk: {}", outlook.summary),
                }),
                alert: Some(AlertDraft {
                    alert_type: "climate".to_string(),
                    severity: if outlook.risk_level == RiskLevel::Critical {
                        AlertSeverity::Critical
                    } else {
                        AlertSeverity::Warning
                    },
                    message: outlook.summary.clone(),
                }),
            }
        }

        PredictionPayload::CropHealth(report) => {
            let fires = report.severity == CropSeverity::High
                || report.health_status == HealthStatus::Critical;
            if !fires {
                return EscalationActions::none();
            }
            // Inherited asymmetry: severity=high maps to warning even when
            // health_status is merely stressed, while a critical status with
            // lower severity maps to critical.
            let severity = if report.severity == CropSeverity::High {
                AlertSeverity::Warning
            } else {
                AlertSeverity::Critical
            };
            let issue = report
                .disease_detected
                .clone()
                .or_else(|| report.pest_detected.clone())
                .unwrap_or_else(|| "Health issue".to_string());
            EscalationActions {
                trigger: None,
                alert: Some(AlertDraft {
                    alert_type: "pest".to_string(),
                    severity,
                    message: format!("{} detected in {}", issue, request.crop_type_or("crops")),
                }),
            }
        }

        PredictionPayload::Market(intel) => {
            if intel.trend == MarketTrend::Increasing && intel.confidence > 0.7 {
                EscalationActions {
                    trigger: None,
                    alert: Some(AlertDraft {
                        alert_type: "market".to_string(),
                        severity: AlertSeverity::Info,
                        message: format!(
                            "{} prices trending up - good selling opportunity",
                            request.commodity_or(&intel.commodity)
                        ),
                    }),
                }
            } else {
                EscalationActions::none()
            }
        }

        PredictionPayload::PostHarvest(assessment) => {
            if !assessment.risk.eq_ignore_ascii_case("high") {
                return EscalationActions::none();
            }
            let threat = assessment
                .warnings
                .first()
                .cloned()
                .unwrap_or_else(|| "Spoilage risk".to_string());
            EscalationActions {
                trigger: None,
                alert: Some(AlertDraft {
                    alert_type: "post_harvest".to_string(),
                    severity: AlertSeverity::Warning,
                    message: format!("{} detected for {}", threat, request.crop_type_or("crops")),
                }),
            }
        }

        // Government reporting aggregates; it never escalates.
        PredictionPayload::GovernmentReport(_) => EscalationActions::none(),
    }
}
