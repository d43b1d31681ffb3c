//! Automation Generator
//!
//! Maps an incident plus its analysis to a simulated remediation and
//! communication plan. Team assignment is a fixed precedence chain; the
//! diagnostic scripts and stakeholder message are templates parameterized by
//! severity and team. Deterministic, like every generator here.

use serde_json::json;

use crate::entities::{Dao, Incident, IncidentAutomation, Severity};
use crate::error::StoreResult;
use crate::logic::analyzer::{self, Analysis};
use crate::logic::analyzer::rules::clamp01;
use crate::logic::audit;
use crate::store::{RecordStore, Where};

// ============================================================================
// TEAMS
// ============================================================================

pub const TEAM_NETWORK: &str = "Network Operations";
pub const TEAM_DATABASE: &str = "Database Reliability";
pub const TEAM_IDENTITY: &str = "Identity & Access";
pub const TEAM_SRE: &str = "Site Reliability Engineering";

/// Automation is slightly more confident than the analysis it executes
pub const AUTOMATION_CONFIDENCE_BOOST: f64 = 0.10;

/// Fixed precedence chain, evaluated top-down.
pub fn assign_team(incident: &Incident) -> (&'static str, String) {
    let source = incident.source.to_lowercase();
    if source.contains("network") {
        return (
            TEAM_NETWORK,
            "Incident source references the network path".to_string(),
        );
    }

    let systems: Vec<String> = incident
        .affected_systems
        .iter()
        .map(|s| s.to_lowercase())
        .collect();
    if systems.iter().any(|s| s.contains("db")) {
        return (
            TEAM_DATABASE,
            "An affected system names a datastore".to_string(),
        );
    }
    if systems.iter().any(|s| s.contains("auth") || s.contains("iam")) {
        return (
            TEAM_IDENTITY,
            "An affected system names the identity path".to_string(),
        );
    }

    (TEAM_SRE, "Default assignment: no specialist match".to_string())
}

// ============================================================================
// PLAN GENERATION
// ============================================================================

/// Build the remediation plan. Pure function of incident + analysis.
pub fn plan(incident: &Incident, analysis: &Analysis) -> IncidentAutomation {
    let (team, rationale) = assign_team(incident);
    let severity = incident.severity;

    IncidentAutomation {
        id: None,
        created_date: None,
        updated_date: None,
        incident_id: incident.id.clone().unwrap_or_default(),
        assigned_team: team.to_string(),
        assignment_rationale: rationale,
        automation_confidence: clamp01(analysis.confidence_score + AUTOMATION_CONFIDENCE_BOOST),
        diagnostic_scripts: diagnostic_scripts(team, severity),
        stakeholder_communication: stakeholder_communication(incident, analysis, team),
    }
}

fn diagnostic_scripts(team: &str, severity: Severity) -> Vec<String> {
    let slug = team
        .to_lowercase()
        .split_whitespace()
        .filter(|word| *word != "&")
        .collect::<Vec<_>>()
        .join("-");
    vec![
        format!("triage/collect-health-snapshot.sh --team {slug} --severity {severity}"),
        format!("triage/tail-error-logs.sh --team {slug} --window 30m"),
        format!("triage/check-recent-deploys.sh --severity {severity}"),
    ]
}

fn stakeholder_communication(incident: &Incident, analysis: &Analysis, team: &str) -> String {
    format!(
        "[{}] {} — {} has been engaged. Estimated recovery: {}. Next update within 30 minutes.",
        incident.severity.as_str().to_uppercase(),
        incident.title,
        team,
        analysis.estimated_recovery_time
    )
}

// ============================================================================
// STORE WORKFLOW
// ============================================================================

/// Generate and persist the plan for an incident.
///
/// Reuses the stored analysis, computing one on the fly when absent (without
/// writing it back). The plan is upserted: at most one automation record per
/// incident_id. An audit entry is appended afterwards with no rollback if it
/// fails.
pub fn automate_incident_response(
    store: &mut RecordStore,
    incident_id: &str,
) -> StoreResult<IncidentAutomation> {
    let incident = Dao::<Incident>::get(store, incident_id)?;
    let analysis = match &incident.ai_analysis {
        Some(analysis) => analysis.clone(),
        None => analyzer::analyze(&incident),
    };

    let plan = plan(&incident, &analysis);

    let clause = Where::new().eq("incident_id", incident_id);
    let existing = Dao::<IncidentAutomation>::filter(store, &clause, None, None)?;
    let saved = match existing.into_iter().next().and_then(|a| a.id) {
        Some(id) => Dao::<IncidentAutomation>::update(store, &id, serde_json::to_value(&plan)?)?,
        None => Dao::<IncidentAutomation>::create(store, &plan)?,
    };

    audit::record(
        store,
        incident_id,
        "automation_generated",
        "system",
        json!({
            "assigned_team": saved.assigned_team,
            "automation_confidence": saved.automation_confidence,
        }),
    )?;

    Ok(saved)
}

// ============================================================================
// TESTS
// ============================================================================
