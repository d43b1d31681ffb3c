//! Incident Desk - Demo Entry Point
//!
//! Walks one incident through the full loop against the process-global
//! store: report, analyze, approve, automate, review, suggest, predict.

use serde_json::json;

use incident_desk_core::api;
use incident_desk_core::constants::{APP_NAME, APP_VERSION};
use incident_desk_core::entities::{DecisionVerdict, Incident, Severity};
use incident_desk_core::error::StoreResult;
use incident_desk_core::logic::workflows;
use incident_desk_core::{seed, store};

fn main() -> StoreResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    let store = store::global();
    let mut store = store.lock();

    seed::ensure_seeded(&mut store)?;

    let incident = workflows::report_incident(
        &mut store,
        &Incident {
            title: "DB outage".to_string(),
            description: "Postgres connection timeouts across checkout".to_string(),
            severity: Severity::Critical,
            source: "monitoring".to_string(),
            affected_systems: vec!["Postgres Primary".to_string(), "Checkout".to_string()],
            ..Default::default()
        },
    )?;
    let id = incident.id.clone().unwrap_or_default();

    let analyzed = workflows::analyze_incident(&mut store, &id)?;
    if let Some(analysis) = &analyzed.ai_analysis {
        println!("Analysis: {}", analysis.summary);
        println!("Confidence: {:.2}", analysis.confidence_score);
        if let Some(recommendation) = analysis.recommendations.first() {
            workflows::submit_decision(
                &mut store,
                &id,
                &recommendation.action,
                DecisionVerdict::Approved,
                "Matches the observed symptoms",
            )?;
        }
    }

    let payload = json!({ "incident_id": id });
    let plan = api::invoke(&mut store, "automateIncidentResponse", &payload)?;
    println!("Assigned team: {}", plan["assigned_team"]);

    let review = api::invoke(&mut store, "generatePostIncidentReview", &payload)?;
    println!(
        "Review timeline entries: {}",
        review["timeline"].as_array().map(Vec::len).unwrap_or(0)
    );

    let suggestions = api::invoke(&mut store, "suggestKnowledgeArticles", &payload)?;
    for suggestion in suggestions["suggestions"].as_array().into_iter().flatten() {
        println!(
            "Suggested: {} ({:.2}) — {}",
            suggestion["title"], suggestion["relevance"], suggestion["reason"]
        );
    }

    let predictions = api::invoke(&mut store, "generatePredictions", &json!({}))?;
    println!(
        "Predictive alerts created: {}",
        predictions["alerts"].as_array().map(Vec::len).unwrap_or(0)
    );

    Ok(())
}
