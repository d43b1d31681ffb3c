//! Audit trail writer
//!
//! Append-only: the application creates audit entries and never updates or
//! deletes them. Every workflow step records one.

use serde_json::Value;

use crate::entities::{AuditLog, Dao};
use crate::error::StoreResult;
use crate::store::RecordStore;

pub fn record(
    store: &mut RecordStore,
    incident_id: &str,
    action_type: &str,
    actor: &str,
    details: Value,
) -> StoreResult<AuditLog> {
    let entry = AuditLog {
        id: None,
        created_date: None,
        updated_date: None,
        incident_id: incident_id.to_string(),
        action_type: action_type.to_string(),
        actor: actor.to_string(),
        details,
    };
    log::debug!("Audit: {} on incident {}", action_type, incident_id);
    Dao::<AuditLog>::create(store, &entry)
}
