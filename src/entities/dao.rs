//! Entity Access Layer
//!
//! Thin typed facade binding a fixed table name to the store's generic
//! operations. Adds no behavior beyond defaulting `sort` to newest-first and
//! capping result sizes; it exists so call sites get a stable typed contract
//! per entity instead of string-keyed table access.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::constants::{DEFAULT_FILTER_LIMIT, DEFAULT_LIST_LIMIT, DEFAULT_SORT};
use crate::error::{StoreError, StoreResult};
use crate::store::{Record, RecordStore, Where};

/// A typed record bound to a fixed table.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    const TABLE: &'static str;
}

/// Typed access to one table. All methods are associated functions taking
/// the store explicitly; the facade itself carries no state.
pub struct Dao<T: Entity> {
    _marker: PhantomData<T>,
}

impl<T: Entity> Dao<T> {
    /// Newest-first listing, capped at 100 unless overridden.
    pub fn list(
        store: &RecordStore,
        sort: Option<&str>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<T>> {
        let records = store.list(
            T::TABLE,
            Some(sort.unwrap_or(DEFAULT_SORT)),
            Some(limit.unwrap_or(DEFAULT_LIST_LIMIT)),
        );
        records.into_iter().map(from_record).collect()
    }

    /// Filtered listing, capped at 1000 unless overridden.
    pub fn filter(
        store: &RecordStore,
        clause: &Where,
        sort: Option<&str>,
        limit: Option<usize>,
    ) -> StoreResult<Vec<T>> {
        let records = store.filter(
            T::TABLE,
            clause,
            Some(sort.unwrap_or(DEFAULT_SORT)),
            Some(limit.unwrap_or(DEFAULT_FILTER_LIMIT)),
        );
        records.into_iter().map(from_record).collect()
    }

    pub fn get(store: &RecordStore, id: &str) -> StoreResult<T> {
        let record = store
            .get(T::TABLE, id)
            .ok_or_else(|| StoreError::not_found(T::TABLE, id))?;
        from_record(record)
    }

    pub fn create(store: &mut RecordStore, data: &T) -> StoreResult<T> {
        let record = store.create(T::TABLE, to_record(data)?)?;
        from_record(record)
    }

    /// Shallow merge-patch by id. `patch` must be a JSON object; its fields
    /// overwrite the stored record's wholesale.
    pub fn update(store: &mut RecordStore, id: &str, patch: Value) -> StoreResult<T> {
        let patch = match patch {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::InvalidPayload(format!(
                    "update patch must be an object, got {other}"
                )))
            }
        };
        let record = store.update(T::TABLE, id, patch)?;
        from_record(record)
    }

    pub fn delete(store: &mut RecordStore, id: &str) -> StoreResult<()> {
        store.delete(T::TABLE, id)
    }
}

fn to_record<T: Serialize>(data: &T) -> StoreResult<Record> {
    match serde_json::to_value(data)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidPayload(format!(
            "entity must serialize to an object, got {other}"
        ))),
    }
}

fn from_record<T: DeserializeOwned>(record: Record) -> StoreResult<T> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Incident, IncidentStatus, Severity};
    use serde_json::json;

    #[test]
    fn test_typed_create_and_get() {
        let mut store = RecordStore::in_memory();
        let created = Dao::<Incident>::create(
            &mut store,
            &Incident {
                title: "Checkout latency".to_string(),
                severity: Severity::High,
                ..Default::default()
            },
        )
        .unwrap();

        let id = created.id.clone().unwrap();
        assert!(created.created_date.is_some());

        let fetched = Dao::<Incident>::get(&store, &id).unwrap();
        assert_eq!(fetched.title, "Checkout latency");
        assert_eq!(fetched.severity, Severity::High);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = RecordStore::in_memory();
        assert!(matches!(
            Dao::<Incident>::get(&store, "missing"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_defaults_newest_first() {
        let mut store = RecordStore::in_memory();
        for (i, title) in ["older", "newer"].iter().enumerate() {
            let mut incident = Incident {
                title: title.to_string(),
                ..Default::default()
            };
            incident.created_date = Some(format!("2026-08-30T0{}:00:00.000000Z", i));
            Dao::<Incident>::create(&mut store, &incident).unwrap();
        }
        let listed = Dao::<Incident>::list(&store, None, None).unwrap();
        assert_eq!(listed[0].title, "newer");
        assert_eq!(listed[1].title, "older");
    }

    #[test]
    fn test_update_patch_replaces_status() {
        let mut store = RecordStore::in_memory();
        let created = Dao::<Incident>::create(
            &mut store,
            &Incident {
                title: "x".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let id = created.id.unwrap();

        let updated =
            Dao::<Incident>::update(&mut store, &id, json!({"status": "resolved"})).unwrap();
        assert_eq!(updated.status, IncidentStatus::Resolved);
    }

    #[test]
    fn test_update_rejects_non_object_patch() {
        let mut store = RecordStore::in_memory();
        assert!(matches!(
            Dao::<Incident>::update(&mut store, "any", json!("not an object")),
            Err(StoreError::InvalidPayload(_))
        ));
    }
}
