//! Top-Level User Actions
//!
//! Each action is a sequence of store operations with no wrapping
//! transaction: a failure partway leaves prior steps applied and later steps
//! unexecuted. That eventual inconsistency (an incident without its audit
//! entry) is accepted by design; there is no compensation logic.

use serde_json::json;

use crate::entities::{Dao, Decision, DecisionVerdict, Incident, IncidentStatus};
use crate::error::StoreResult;
use crate::identity;
use crate::logic::{analyzer, audit};
use crate::store::{now_iso, RecordStore};

/// Create the incident record, then its creation audit entry.
pub fn report_incident(store: &mut RecordStore, incident: &Incident) -> StoreResult<Incident> {
    let user = identity::current_user(store);
    let created = Dao::<Incident>::create(store, incident)?;
    let id = created.id.clone().unwrap_or_default();

    audit::record(
        store,
        &id,
        "incident_created",
        &user.email,
        json!({ "severity": created.severity, "source": created.source }),
    )?;
    log::info!("Incident reported: {} ({})", created.title, created.severity);
    Ok(created)
}

/// Run the heuristic analyzer and write the result back onto the incident
/// (shallow merge replaces any previous `ai_analysis` wholesale), moving the
/// status to analyzing.
pub fn analyze_incident(store: &mut RecordStore, incident_id: &str) -> StoreResult<Incident> {
    let incident = Dao::<Incident>::get(store, incident_id)?;
    let analysis = analyzer::analyze(&incident);

    let updated = Dao::<Incident>::update(
        store,
        incident_id,
        json!({
            "ai_analysis": analysis,
            "status": IncidentStatus::Analyzing,
        }),
    )?;

    audit::record(
        store,
        incident_id,
        "ai_analysis_completed",
        "system",
        json!({ "confidence_score": updated.ai_analysis.as_ref().map(|a| a.confidence_score) }),
    )?;
    Ok(updated)
}

/// Record a human verdict on a recommended action: decision record, audit
/// entry, and on approval a status move to in-progress.
pub fn submit_decision(
    store: &mut RecordStore,
    incident_id: &str,
    recommendation_action: &str,
    verdict: DecisionVerdict,
    reason: &str,
) -> StoreResult<Decision> {
    // Validate the reference up front; decisions are append-only afterwards
    Dao::<Incident>::get(store, incident_id)?;
    let user = identity::current_user(store);

    let decision = Dao::<Decision>::create(
        store,
        &Decision {
            id: None,
            created_date: None,
            updated_date: None,
            incident_id: incident_id.to_string(),
            recommendation_action: recommendation_action.to_string(),
            decision: verdict,
            decided_by: user.email.clone(),
            decided_at: now_iso(),
            decision_reason: reason.to_string(),
        },
    )?;

    audit::record(
        store,
        incident_id,
        "decision_submitted",
        &user.email,
        json!({ "decision": verdict, "recommendation_action": recommendation_action }),
    )?;

    if verdict == DecisionVerdict::Approved {
        Dao::<Incident>::update(
            store,
            incident_id,
            json!({ "status": IncidentStatus::InProgress }),
        )?;
    }

    Ok(decision)
}

/// Close out an incident with resolution notes.
pub fn resolve_incident(
    store: &mut RecordStore,
    incident_id: &str,
    notes: &str,
) -> StoreResult<Incident> {
    let user = identity::current_user(store);
    let updated = Dao::<Incident>::update(
        store,
        incident_id,
        json!({
            "status": IncidentStatus::Resolved,
            "resolved_at": now_iso(),
            "resolution_notes": notes,
        }),
    )?;

    audit::record(store, incident_id, "incident_resolved", &user.email, json!({}))?;
    log::info!("Incident resolved: {}", incident_id);
    Ok(updated)
}
