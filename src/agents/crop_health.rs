// AgriMind: Crop-health agent
// Assesses crop condition for a location and crop type, optionally noting
// an image reference. Fires a pest alert on high severity or a critical
// health status.

use super::{Agent, AgentContext};
use crate::normalize::normalize;
use crate::request::AgentRequest;
use crate::types::{AgentType, CropHealthReport, HealthStatus, CropSeverity, PredictionPayload, RiskLevel};
use async_trait::async_trait;

pub struct CropHealthAgent;

#[async_trait]
impl Agent for CropHealthAgent {
    fn agent_type(&self) -> AgentType {
        AgentType::CropHealth
    }

    fn name(&self) -> &str {
        "CropHealth"
    }

    fn system_prompt(&self) -> &str {
        "You are an agricultural crop health AI specialist. Always respond with valid JSON."
    }

    fn temperature(&self) -> f32 {
        0.5
    }

    fn build_prompt(&self, request: &AgentRequest, _ctx: &AgentContext) -> String {
        let image_note = match &request.image_url {
            Some(url) => format!("Image provided for analysis: {}", url),
            None => "No image provided - provide general assessment".to_string(),
        };
        format!(
            r#"You are a crop health monitoring AI agent specializing in Kenyan agriculture.

Location: {location}
Crop Type: {crop}
{image_note}

Analyze and provide:
1. Overall health status (healthy, stressed, diseased, critical)
2. Potential diseases or issues detected
3. Pest detection if any
4. Confidence score (0.0 to 1.0)
5. Recommended actions

Respond in JSON format:
{{
  "health_status": "healthy|stressed|diseased|critical",
  "disease_detected": "name or null",
  "pest_detected": "name or null",
  "confidence_score": 0.85,
  "analysis": "detailed analysis",
  "recommendations": ["action1", "action2"],
  "severity": "low|medium|high"
}}"#,
            location = request.region_or("Unknown"),
            crop = request.crop_type_or("crops"),
            image_note = image_note,
        )
    }

    fn normalize(&self, raw: &str) -> PredictionPayload {
        PredictionPayload::CropHealth(normalize::<CropHealthReport>(raw))
    }

    fn risk_level(&self, payload: &PredictionPayload, _ctx: &AgentContext) -> RiskLevel {
        match payload {
            PredictionPayload::CropHealth(report) => {
                if report.health_status == HealthStatus::Critical {
                    RiskLevel::Critical
                } else {
                    match report.severity {
                        CropSeverity::Low => RiskLevel::Low,
                        CropSeverity::Medium => RiskLevel::Medium,
                        CropSeverity::High => RiskLevel::High,
                    }
                }
            }
            _ => RiskLevel::Medium,
        }
    }
}
