//! Entity Types
//!
//! Typed per-table records and their enums. Data structures only; behavior
//! lives in `logic/`. Every entity carries the store-assigned `id` and
//! timestamp fields as options: absent before `create`, set after.

pub mod dao;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logic::analyzer::Analysis;

pub use dao::{Dao, Entity};

// ============================================================================
// ENUMS
// ============================================================================

/// Incident severity for triage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Incident lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    New,
    Analyzing,
    AwaitingApproval,
    InProgress,
    Resolved,
    Closed,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::New => "new",
            IncidentStatus::Analyzing => "analyzing",
            IncidentStatus::AwaitingApproval => "awaiting_approval",
            IncidentStatus::InProgress => "in_progress",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Closed => "closed",
        }
    }
}

/// Human verdict on a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionVerdict {
    Approved,
    Rejected,
    Modified,
}

impl DecisionVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionVerdict::Approved => "approved",
            DecisionVerdict::Rejected => "rejected",
            DecisionVerdict::Modified => "modified",
        }
    }
}

/// Predictive alert lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    #[default]
    Active,
    Prevented,
    Dismissed,
    Occurred,
}

/// Knowledge-base article lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Knowledge-base article category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleCategory {
    Troubleshooting,
    Runbook,
    Postmortem,
    Architecture,
    #[default]
    General,
}

// ============================================================================
// ENTITIES
// ============================================================================

/// A reported incident, the root entity of the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub status: IncidentStatus,
    /// Where the report came from (monitoring, on-call page, user report)
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub affected_systems: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Heuristic analysis, written back after `workflows::analyze_incident`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<Analysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

impl Entity for Incident {
    const TABLE: &'static str = "incident";
}

/// Human verdict on one recommended action. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    pub incident_id: String,
    pub recommendation_action: String,
    pub decision: DecisionVerdict,
    pub decided_by: String,
    pub decided_at: String,
    #[serde(default)]
    pub decision_reason: String,
}

impl Entity for Decision {
    const TABLE: &'static str = "decision";
}

/// Audit trail entry. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    pub incident_id: String,
    /// Free-form tag, e.g. `incident_created`, `decision_submitted`
    pub action_type: String,
    pub actor: String,
    #[serde(default)]
    pub details: Value,
}

impl Entity for AuditLog {
    const TABLE: &'static str = "audit_log";
}

/// A predicted issue that has not happened yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictiveAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    #[serde(default)]
    pub severity: Severity,
    /// Probability the predicted issue occurs, 0..=1
    #[serde(default)]
    pub likelihood: f64,
    #[serde(default)]
    pub predicted_timeframe: String,
    #[serde(default)]
    pub predicted_issue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub affected_systems: Vec<String>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub contributing_factors: Vec<String>,
    #[serde(default)]
    pub preventative_actions: Vec<String>,
    #[serde(default)]
    pub status: AlertStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissed_reason: Option<String>,
}

impl Entity for PredictiveAlert {
    const TABLE: &'static str = "predictive_alert";
}

/// One entry in a review timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub at: String,
    pub action: String,
    #[serde(default)]
    pub details: Value,
}

/// Decision snapshot embedded in a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionSnapshot {
    pub recommendation_action: String,
    pub decision: DecisionVerdict,
    pub decided_by: String,
    pub decided_at: String,
    #[serde(default)]
    pub decision_reason: String,
}

/// Post-incident review. At most one per incident (upserted by its
/// generator; the store itself does not enforce uniqueness).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostIncidentReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    pub incident_id: String,
    #[serde(default)]
    pub executive_summary: String,
    #[serde(default)]
    pub customer_impact: String,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub decisions: Vec<DecisionSnapshot>,
    #[serde(default)]
    pub what_went_well: Vec<String>,
    #[serde(default)]
    pub what_went_wrong: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
}

impl Entity for PostIncidentReview {
    const TABLE: &'static str = "post_incident_review";
}

/// Simulated remediation and communication plan. At most one per incident
/// (upserted by the automation generator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentAutomation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    pub incident_id: String,
    #[serde(default)]
    pub assigned_team: String,
    #[serde(default)]
    pub assignment_rationale: String,
    #[serde(default)]
    pub automation_confidence: f64,
    #[serde(default)]
    pub diagnostic_scripts: Vec<String>,
    #[serde(default)]
    pub stakeholder_communication: String,
}

impl Entity for IncidentAutomation {
    const TABLE: &'static str = "incident_automation";
}

/// Knowledge-base article used by the suggestion generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBaseArticle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,

    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Markdown body
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: ArticleCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub related_systems: Vec<String>,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub helpful_count: u64,
}

impl Entity for KnowledgeBaseArticle {
    const TABLE: &'static str = "knowledge_base_article";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serializes_snake_case() {
        assert_eq!(serde_json::to_value(Severity::Critical).unwrap(), "critical");
        assert_eq!(
            serde_json::to_value(IncidentStatus::AwaitingApproval).unwrap(),
            "awaiting_approval"
        );
    }

    #[test]
    fn test_missing_severity_defaults_to_medium() {
        let incident: Incident = serde_json::from_value(serde_json::json!({
            "title": "No severity given"
        }))
        .unwrap();
        assert_eq!(incident.severity, Severity::Medium);
        assert_eq!(incident.status, IncidentStatus::New);
    }

    #[test]
    fn test_unset_id_is_not_serialized() {
        let incident = Incident {
            title: "x".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&incident).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("created_date").is_none());
    }
}
