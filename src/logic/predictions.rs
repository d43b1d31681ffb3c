//! Predictive Alert Generator
//!
//! Creates a fixed batch of predictive alerts from canned templates plus one
//! alert parameterized by the most frequent affected system across existing
//! incidents. Created timestamps are staggered by one hour per position so
//! the newest-first default sort keeps the batch in template order.

use std::collections::BTreeMap;

use chrono::{Duration, SecondsFormat, Utc};

use crate::entities::{AlertStatus, Dao, Incident, PredictiveAlert, Severity};
use crate::error::StoreResult;
use crate::store::RecordStore;

/// Systems used for the parameterized alert when no incidents exist yet
pub const FALLBACK_SYSTEMS: &[&str] = &["API Gateway", "Postgres Primary", "Auth Service"];

/// Most frequent affected system across all incidents; ties resolve to the
/// lexicographically smallest name so the output stays deterministic.
fn most_frequent_system(incidents: &[Incident]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for incident in incidents {
        for system in &incident.affected_systems {
            *counts.entry(system.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
        .map(|(name, _)| name.to_string())
}

fn template_alerts() -> Vec<PredictiveAlert> {
    vec![
        PredictiveAlert {
            severity: Severity::High,
            likelihood: 0.72,
            predicted_timeframe: "next 24 hours".to_string(),
            predicted_issue: "Connection pool saturation in the primary datastore".to_string(),
            description: "Pool utilization has been trending toward its ceiling during peak traffic."
                .to_string(),
            affected_systems: vec!["Postgres Primary".to_string()],
            confidence_score: 0.68,
            contributing_factors: vec![
                "Sustained growth in concurrent sessions".to_string(),
                "No pool size change since last quarter".to_string(),
            ],
            preventative_actions: vec![
                "Raise the pool ceiling ahead of peak".to_string(),
                "Enable slow-query sampling".to_string(),
            ],
            ..Default::default()
        },
        PredictiveAlert {
            severity: Severity::Medium,
            likelihood: 0.55,
            predicted_timeframe: "next 48 hours".to_string(),
            predicted_issue: "Elevated 5xx rate at the public gateway".to_string(),
            description: "Edge error budget consumption is ahead of the monthly pace.".to_string(),
            affected_systems: vec!["API Gateway".to_string()],
            confidence_score: 0.60,
            contributing_factors: vec![
                "Two upstreams deploying daily".to_string(),
                "Retry amplification observed under load".to_string(),
            ],
            preventative_actions: vec![
                "Tighten upstream timeout budgets".to_string(),
                "Stage deploys outside peak windows".to_string(),
            ],
            ..Default::default()
        },
        PredictiveAlert {
            severity: Severity::Low,
            likelihood: 0.35,
            predicted_timeframe: "next 7 days".to_string(),
            predicted_issue: "TLS certificate expiry for internal services".to_string(),
            description: "A batch of internal certificates approaches its renewal window."
                .to_string(),
            affected_systems: vec!["Internal Service Mesh".to_string()],
            confidence_score: 0.55,
            contributing_factors: vec!["Certificates issued in the same batch".to_string()],
            preventative_actions: vec!["Rotate the batch before the window opens".to_string()],
            ..Default::default()
        },
    ]
}

/// Build and persist the alert batch: three canned templates plus one
/// parameterized by incident history. All created active.
pub fn generate_predictions(store: &mut RecordStore) -> StoreResult<Vec<PredictiveAlert>> {
    let incidents = Dao::<Incident>::list(store, None, Some(1000))?;
    let top_system = most_frequent_system(&incidents);

    let mut alerts = template_alerts();

    let (issue_system, affected) = match top_system {
        Some(system) => (system.clone(), vec![system]),
        None => (
            FALLBACK_SYSTEMS[0].to_string(),
            FALLBACK_SYSTEMS.iter().map(|s| s.to_string()).collect(),
        ),
    };
    alerts.push(PredictiveAlert {
        severity: Severity::Medium,
        likelihood: 0.48,
        predicted_timeframe: "next 72 hours".to_string(),
        predicted_issue: format!("Recurring instability in {issue_system}"),
        description: format!(
            "{issue_system} appears most often across reported incidents; correlated load events make a repeat likely."
        ),
        affected_systems: affected,
        confidence_score: 0.52,
        contributing_factors: vec!["Repeated appearances in recent incident reports".to_string()],
        preventative_actions: vec![
            format!("Schedule a resilience review for {issue_system}"),
            "Add a canary probe on the recurring failure path".to_string(),
        ],
        ..Default::default()
    });

    // Stagger creation timestamps (1-hour decrements) so default sort keeps
    // template order
    let now = Utc::now();
    let mut created = Vec::with_capacity(alerts.len());
    for (i, mut alert) in alerts.into_iter().enumerate() {
        alert.status = AlertStatus::Active;
        alert.created_date = Some(
            (now - Duration::hours(i as i64)).to_rfc3339_opts(SecondsFormat::Micros, true),
        );
        created.push(Dao::<PredictiveAlert>::create(store, &alert)?);
    }

    log::debug!("Generated {} predictive alerts", created.len());
    Ok(created)
}
