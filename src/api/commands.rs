//! Generator Dispatch - API for the dashboard
//!
//! Single entry point taking a generator name and a JSON payload, mirroring
//! the dashboard's named-function contract. Unknown names fail with
//! `UnknownOperation`; payloads and results cross this boundary as JSON.

use serde_json::{json, Value};

use crate::error::{StoreError, StoreResult};
use crate::logic::{articles, automation, predictions, review, suggestions};
use crate::store::RecordStore;

/// Generator names accepted by `invoke`, in the dashboard's spelling.
pub const OPERATIONS: &[&str] = &[
    "generatePredictions",
    "automateIncidentResponse",
    "generatePostIncidentReview",
    "suggestKnowledgeArticles",
    "generateArticleFromIncident",
];

fn incident_id(payload: &Value) -> StoreResult<&str> {
    payload
        .get("incident_id")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidPayload("missing 'incident_id'".to_string()))
}

/// Dispatch one generator invocation.
pub fn invoke(store: &mut RecordStore, name: &str, payload: &Value) -> StoreResult<Value> {
    log::debug!("Dispatch: {}", name);
    match name {
        "generatePredictions" => {
            let alerts = predictions::generate_predictions(store)?;
            Ok(json!({ "alerts": alerts }))
        }
        "automateIncidentResponse" => {
            let plan = automation::automate_incident_response(store, incident_id(payload)?)?;
            Ok(serde_json::to_value(plan)?)
        }
        "generatePostIncidentReview" => {
            let review = review::generate_post_incident_review(store, incident_id(payload)?)?;
            Ok(serde_json::to_value(review)?)
        }
        "suggestKnowledgeArticles" => {
            let ranked = suggestions::suggest_knowledge_articles(store, incident_id(payload)?)?;
            Ok(json!({ "suggestions": ranked }))
        }
        "generateArticleFromIncident" => {
            let article = articles::generate_article_from_incident(store, incident_id(payload)?)?;
            Ok(serde_json::to_value(article)?)
        }
        other => Err(StoreError::UnknownOperation(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Dao, Incident, Severity};

    #[test]
    fn test_unknown_operation_fails() {
        let mut store = RecordStore::in_memory();
        let err = invoke(&mut store, "summonOracle", &json!({})).unwrap_err();
        assert!(matches!(err, StoreError::UnknownOperation(name) if name == "summonOracle"));
    }

    #[test]
    fn test_missing_incident_id_is_invalid_payload() {
        let mut store = RecordStore::in_memory();
        let err = invoke(&mut store, "automateIncidentResponse", &json!({})).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPayload(_)));
    }

    #[test]
    fn test_generate_predictions_returns_alerts() {
        let mut store = RecordStore::in_memory();
        let result = invoke(&mut store, "generatePredictions", &json!({})).unwrap();
        assert_eq!(result["alerts"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_automation_dispatch_round_trip() {
        let mut store = RecordStore::in_memory();
        let incident = Dao::<Incident>::create(
            &mut store,
            &Incident {
                title: "Auth outage".to_string(),
                description: "SSO token validation failing for all tenants".to_string(),
                severity: Severity::Critical,
                affected_systems: vec!["Auth Service".to_string()],
                ..Default::default()
            },
        )
        .unwrap();

        let result = invoke(
            &mut store,
            "automateIncidentResponse",
            &json!({ "incident_id": incident.id.unwrap() }),
        )
        .unwrap();
        assert_eq!(result["assigned_team"], "Identity & Access");
    }
}
