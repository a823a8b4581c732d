// End-to-end agent pipeline tests over the in-memory store and a scripted
// oracle: the four reference scenarios, the non-blocking dispatch property
// and the degraded store paths.

mod common;

use agrimind::agents::AgentRunner;
use agrimind::request::AgentRequest;
use agrimind::types::{
    AgentType, AlertSeverity, HealthStatus, PredictionPayload, RiskLevel,
};
use agrimind::AgentError;
use common::{
    wait_for_predictions, BrokenStore, Script, ScriptedOracle, CLIMATE, CROP_HEALTH, MARKET,
    POST_HARVEST,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const CRITICAL_CLIMATE_JSON: &str = r#"{"risk_level":"critical","summary":"Flash flood warning","rainfall_forecast":"Extreme rainfall expected","temperature_trend":"Cooling","recommendations":[],"warnings":["Flooding"]}"#;

fn runner_with(oracle: ScriptedOracle) -> (AgentRunner, Arc<agrimind::MemoryStore>) {
    let store = Arc::new(agrimind::MemoryStore::new());
    let runner = AgentRunner::new(Arc::new(oracle), store.clone());
    (runner, store)
}

#[tokio::test]
async fn scenario_a_critical_climate_cascades_to_post_harvest_and_alert() {
    let oracle = ScriptedOracle::new()
        .on(CLIMATE, Script::Reply(CRITICAL_CLIMATE_JSON.to_string()))
        .on(
            POST_HARVEST,
            Script::Reply(r#"{"risk":"Low","safe_days":14,"warnings":[],"logistics_action":"Standard rotation"}"#.to_string()),
        );
    let (runner, store) = runner_with(oracle);

    let outcome = runner
        .run(AgentType::Climate, AgentRequest::for_region("Kiambu"))
        .await
        .unwrap();

    assert!(outcome.persisted);
    assert_eq!(outcome.record.agent_type, AgentType::Climate);
    assert_eq!(outcome.record.risk_level, RiskLevel::Critical);
    assert!(outcome.record.expires_at.is_some());

    // The dispatched post-harvest run lands asynchronously
    let predictions = wait_for_predictions(&store, |rows| rows.len() == 2).await;
    let post_harvest = predictions
        .iter()
        .find(|p| p.agent_type == AgentType::PostHarvest)
        .expect("post-harvest agent was not triggered");
    let reason = post_harvest
        .payload
        .trigger_reason()
        .expect("trigger reason not persisted");
    assert!(reason.contains("Flash flood warning"));

    let alerts = store.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    assert_eq!(alerts[0].location, "Kiambu");
    assert_eq!(alerts[0].message, "Flash flood warning");
}

#[tokio::test]
async fn scenario_b_unparsable_crop_health_defaults_without_alert() {
    let oracle = ScriptedOracle::new().on(
        CROP_HEALTH,
        Script::Reply("The maize looks mostly fine, maybe some rust?".to_string()),
    );
    let (runner, store) = runner_with(oracle);

    let request = AgentRequest {
        location: Some("Kiambu".to_string()),
        crop_type: Some("Maize".to_string()),
        ..Default::default()
    };
    let outcome = runner.run(AgentType::CropHealth, request).await.unwrap();

    match &outcome.record.payload {
        PredictionPayload::CropHealth(report) => {
            assert_eq!(report.health_status, HealthStatus::Unknown);
            assert_eq!(report.confidence_score, 0.5);
        }
        other => panic!("unexpected payload: {:?}", other),
    }
    assert!(outcome.escalation.is_empty());
    assert!(store.alerts().is_empty());
}

#[tokio::test]
async fn scenario_c_confident_rising_market_emits_info_alert() {
    let oracle = ScriptedOracle::new().on(
        MARKET,
        Script::Reply(r#"{"trend":"increasing","confidence":0.85,"price_prediction":"Up 10%"}"#.to_string()),
    );
    let (runner, store) = runner_with(oracle);

    let request = AgentRequest {
        commodity: Some("Maize".to_string()),
        location: Some("Nairobi".to_string()),
        ..Default::default()
    };
    let outcome = runner.run(AgentType::Market, request).await.unwrap();
    assert_eq!(outcome.record.risk_level, RiskLevel::Low);

    let alerts = store.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Info);
    assert!(alerts[0].message.contains("Maize"));
}

#[tokio::test]
async fn scenario_d_triggered_post_harvest_high_risk_warns_and_keeps_reason() {
    let oracle = ScriptedOracle::new().on(
        POST_HARVEST,
        Script::Reply(r#"{"risk":"High","safe_days":3,"warnings":["Mold growth"],"logistics_action":"Sell immediately"}"#.to_string()),
    );
    let (runner, store) = runner_with(oracle);

    let request = AgentRequest {
        region: Some("Nakuru".to_string()),
        crop_type: Some("Wheat".to_string()),
        storage_type: Some("Silo".to_string()),
        trigger_reason: Some("Climate Risk: Heavy rains".to_string()),
        ..Default::default()
    };
    let outcome = runner.run(AgentType::PostHarvest, request).await.unwrap();

    assert_eq!(outcome.record.risk_level, RiskLevel::High);
    assert_eq!(
        outcome.record.payload.trigger_reason(),
        Some("Climate Risk: Heavy rains")
    );

    let alerts = store.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    assert!(alerts[0].message.contains("Mold growth"));
    assert!(alerts[0].message.contains("Wheat"));
}

#[tokio::test]
async fn dispatch_does_not_block_the_originating_run() {
    let oracle = ScriptedOracle::new()
        .on(CLIMATE, Script::Reply(CRITICAL_CLIMATE_JSON.to_string()))
        .on(
            POST_HARVEST,
            Script::ReplyAfter(r#"{"risk":"Low"}"#.to_string(), Duration::from_millis(1500)),
        );
    let (runner, store) = runner_with(oracle);

    let started = Instant::now();
    let outcome = runner
        .run(AgentType::Climate, AgentRequest::for_region("Kiambu"))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome.record.risk_level, RiskLevel::Critical);
    assert!(
        elapsed < Duration::from_millis(500),
        "climate run waited on downstream dispatch: {:?}",
        elapsed
    );

    // The slow downstream run still completes eventually
    let predictions = wait_for_predictions(&store, |rows| rows.len() == 2).await;
    assert_eq!(predictions.len(), 2);
}

#[tokio::test]
async fn failing_downstream_does_not_fail_the_originating_run() {
    let oracle = ScriptedOracle::new()
        .on(CLIMATE, Script::Reply(CRITICAL_CLIMATE_JSON.to_string()))
        .on(
            POST_HARVEST,
            Script::Fail("post-harvest oracle offline".to_string()),
        );
    let (runner, store) = runner_with(oracle);

    let outcome = runner
        .run(AgentType::Climate, AgentRequest::for_region("Kiambu"))
        .await
        .unwrap();
    assert_eq!(outcome.record.risk_level, RiskLevel::Critical);

    // Give the failed dispatch time to run; only the climate record exists
    tokio::time::sleep(Duration::from_millis(200)).await;
    let predictions = store.predictions();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].agent_type, AgentType::Climate);
}

#[tokio::test]
async fn oracle_failure_is_the_only_caller_visible_error() {
    let oracle = ScriptedOracle::new().on(CLIMATE, Script::Fail("gateway 503".to_string()));
    let (runner, store) = runner_with(oracle);

    let result = runner
        .run(AgentType::Climate, AgentRequest::for_region("Kiambu"))
        .await;
    match result {
        Err(AgentError::OracleUnavailable(message)) => assert!(message.contains("gateway 503")),
        other => panic!("expected OracleUnavailable, got {:?}", other.map(|o| o.record)),
    }
    assert!(store.predictions().is_empty());
    assert!(store.alerts().is_empty());
}

#[tokio::test]
async fn broken_store_degrades_but_still_answers() {
    let oracle = ScriptedOracle::new().on(CLIMATE, Script::Reply(CRITICAL_CLIMATE_JSON.to_string()));
    let runner = AgentRunner::new(Arc::new(oracle), Arc::new(BrokenStore));

    let outcome = runner
        .run(AgentType::Climate, AgentRequest::for_region("Kiambu"))
        .await
        .unwrap();

    assert!(!outcome.persisted);
    assert!(!outcome.record.id.is_empty());
    assert_eq!(outcome.record.risk_level, RiskLevel::Critical);
    assert!(outcome.escalation.alert.is_some());
}

#[tokio::test]
async fn government_report_reflects_alert_volume() {
    let oracle = ScriptedOracle::new()
        .on(MARKET, Script::Reply(r#"{"trend":"increasing","confidence":0.9}"#.to_string()))
        .on(
            common::GOVERNMENT,
            Script::Reply(r#"{"executive_summary":"Stable season","critical_risks":[],"regional_hotspots":["Kiambu"],"recommended_interventions":[],"economic_impact_estimate":"Low"}"#.to_string()),
        );
    let (runner, _store) = runner_with(oracle);

    // Six market runs each produce an info alert, pushing the count past 5
    for _ in 0..6 {
        runner
            .run(
                AgentType::Market,
                AgentRequest {
                    commodity: Some("Maize".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let outcome = runner
        .run(AgentType::GovernmentReporting, AgentRequest::default())
        .await
        .unwrap();
    assert_eq!(outcome.record.region, "National");
    assert_eq!(outcome.record.risk_level, RiskLevel::High);
    assert!(outcome.escalation.is_empty());
}

#[tokio::test]
async fn concurrent_duplicate_runs_produce_independent_records() {
    let oracle = ScriptedOracle::new().on(
        CLIMATE,
        Script::Reply(r#"{"risk_level":"low","summary":"Calm week"}"#.to_string()),
    );
    let (runner, store) = runner_with(oracle);

    let runs = (0..4).map(|_| {
        let runner = runner.clone();
        tokio::spawn(async move {
            runner
                .run(AgentType::Climate, AgentRequest::for_region("Kiambu"))
                .await
        })
    });
    for handle in runs {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.predictions().len(), 4);
}
