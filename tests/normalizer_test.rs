// Schema-completeness property: whatever the oracle answers, every agent's
// normalized payload carries all of its required fields.

use agrimind::agents::{profile, Agent};
use agrimind::types::AgentType;

/// Oracle outputs the normalizer must survive.
const HOSTILE_INPUTS: &[&str] = &[
    "",
    "   ",
    "I cannot help with that.",
    "{",
    "{\"unexpected\": [1,2,3]}",
    "null",
    "[1, 2, 3]",
    "```json\n{\"risk_level\": \"high\"\n```",
    "```\ntotally not json\n```",
    "Sure! Here is the JSON you asked for: {\"trend\": }",
    "{\"confidence\": \"very high\", \"trend\": 42}",
];

fn required_fields(agent_type: AgentType) -> &'static [&'static str] {
    match agent_type {
        AgentType::Climate => &[
            "risk_level",
            "rainfall_forecast",
            "temperature_trend",
            "recommendations",
            "warnings",
            "summary",
        ],
        AgentType::CropHealth => &[
            "health_status",
            "confidence_score",
            "analysis",
            "recommendations",
            "severity",
        ],
        AgentType::Market => &[
            "trend",
            "price_prediction",
            "best_selling_time",
            "supply_analysis",
            "demand_analysis",
            "opportunities",
            "recommendations",
            "confidence",
        ],
        AgentType::PostHarvest => &["risk", "safe_days", "warnings", "logistics_action"],
        AgentType::GovernmentReporting => &[
            "executive_summary",
            "critical_risks",
            "regional_hotspots",
            "recommended_interventions",
            "economic_impact_estimate",
        ],
    }
}

#[test]
fn every_agent_payload_is_complete_under_hostile_output() {
    for agent_type in AgentType::ALL {
        let agent = profile(agent_type);
        for input in HOSTILE_INPUTS {
            let payload = agent.normalize(input);
            let value = payload.to_value();
            // Internally tagged payloads serialize flat: the schema tag
            // sits alongside the fields
            let fields = value
                .as_object()
                .unwrap_or_else(|| panic!("{} payload is not an object", agent_type));
            for field in required_fields(agent_type) {
                assert!(
                    fields.contains_key(*field),
                    "{} payload missing `{}` for input {:?}",
                    agent_type,
                    field,
                    input
                );
                assert!(
                    !fields[*field].is_null(),
                    "{} field `{}` is null for input {:?}",
                    agent_type,
                    field,
                    input
                );
            }
        }
    }
}

#[test]
fn confidence_values_are_clamped_into_unit_range() {
    let mut payload = profile(AgentType::Market)
        .normalize(r#"{"trend":"increasing","confidence":7.5}"#);
    payload.sanitize();
    match payload {
        agrimind::types::PredictionPayload::Market(intel) => {
            assert!(intel.confidence <= 1.0);
        }
        other => panic!("unexpected payload: {:?}", other),
    }

    let mut payload = profile(AgentType::CropHealth)
        .normalize(r#"{"health_status":"healthy","confidence_score":-3.0}"#);
    payload.sanitize();
    match payload {
        agrimind::types::PredictionPayload::CropHealth(report) => {
            assert!(report.confidence_score >= 0.0);
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn well_formed_output_passes_through_unchanged() {
    let payload = profile(AgentType::Climate).normalize(
        r#"{"risk_level":"high","rainfall_forecast":"Heavy","temperature_trend":"Rising","recommendations":["Drain fields"],"warnings":["Flooding"],"summary":"Wet week ahead"}"#,
    );
    match payload {
        agrimind::types::PredictionPayload::Climate(outlook) => {
            assert_eq!(outlook.summary, "Wet week ahead");
            assert_eq!(outlook.recommendations, vec!["Drain fields".to_string()]);
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}
