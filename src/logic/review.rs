//! Post-Incident Review Generator
//!
//! Aggregates an incident's audit trail and decisions into a review record:
//! chronological timeline, decision snapshot, executive summary reused from
//! the stored analysis (or computed fresh when absent), fixed retro lists,
//! and exactly two action items. Upserted: one review per incident.

use crate::entities::{
    AuditLog, Dao, Decision, DecisionSnapshot, Incident, PostIncidentReview, TimelineEntry,
};
use crate::error::StoreResult;
use crate::logic::analyzer;
use crate::store::{RecordStore, Where};

fn timeline(entries: Vec<AuditLog>) -> Vec<TimelineEntry> {
    entries
        .into_iter()
        .map(|entry| TimelineEntry {
            at: entry.created_date.unwrap_or_default(),
            action: entry.action_type,
            details: entry.details,
        })
        .collect()
}

fn decision_snapshot(decisions: Vec<Decision>) -> Vec<DecisionSnapshot> {
    decisions
        .into_iter()
        .map(|d| DecisionSnapshot {
            recommendation_action: d.recommendation_action,
            decision: d.decision,
            decided_by: d.decided_by,
            decided_at: d.decided_at,
            decision_reason: d.decision_reason,
        })
        .collect()
}

fn customer_impact(incident: &Incident) -> String {
    if incident.affected_systems.is_empty() {
        format!(
            "{} severity incident; no affected systems were recorded.",
            incident.severity
        )
    } else {
        format!(
            "{} severity incident affecting: {}.",
            incident.severity,
            incident.affected_systems.join(", ")
        )
    }
}

/// Build and upsert the review for an incident.
pub fn generate_post_incident_review(
    store: &mut RecordStore,
    incident_id: &str,
) -> StoreResult<PostIncidentReview> {
    let incident = Dao::<Incident>::get(store, incident_id)?;

    let clause = Where::new().eq("incident_id", incident_id);
    // Chronological, oldest first
    let audit_entries = Dao::<AuditLog>::filter(store, &clause, Some("created_date"), None)?;
    let decisions = Dao::<Decision>::filter(store, &clause, Some("created_date"), None)?;

    let executive_summary = match &incident.ai_analysis {
        Some(analysis) => analysis.summary.clone(),
        None => analyzer::analyze(&incident).summary,
    };

    let review = PostIncidentReview {
        id: None,
        created_date: None,
        updated_date: None,
        incident_id: incident_id.to_string(),
        executive_summary,
        customer_impact: customer_impact(&incident),
        timeline: timeline(audit_entries),
        decisions: decision_snapshot(decisions),
        what_went_well: vec![
            "Automated triage produced an initial hypothesis within seconds.".to_string(),
            "Every action on the incident left an audit trail entry.".to_string(),
        ],
        what_went_wrong: vec![
            "Heuristic analysis lacked telemetry to confirm the leading cause.".to_string(),
            "Stakeholder communication depended on a manual trigger.".to_string(),
        ],
        action_items: vec![
            "Wire monitoring signals into the analyzer input.".to_string(),
            "Automate the first stakeholder update on incident creation.".to_string(),
        ],
    };

    let existing = Dao::<PostIncidentReview>::filter(store, &clause, None, None)?;
    let saved = match existing.into_iter().next().and_then(|r| r.id) {
        Some(id) => {
            Dao::<PostIncidentReview>::update(store, &id, serde_json::to_value(&review)?)?
        }
        None => Dao::<PostIncidentReview>::create(store, &review)?,
    };

    Ok(saved)
}
