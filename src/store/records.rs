//! Record store
//!
//! Durable table storage keyed by table name. Generic CRUD with filtering and
//! sorting over dynamic JSON records. The whole store is serialized to one
//! durable key on every mutation; a second key carries the small metadata
//! blob. There are no transactions: multi-record workflows accept partial
//! completion (see `logic::workflows`).

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::{META_KEY, STORE_KEY, STORE_VERSION};
use crate::error::{StoreError, StoreResult};
use crate::store::backend::PersistenceBackend;
use crate::store::matcher::{value_cmp, SortSpec, Where};
use crate::store::Record;

// ============================================================================
// PERSISTED SHAPES
// ============================================================================

/// The whole-store blob persisted under the `store` key.
#[derive(Debug, Serialize, Deserialize)]
struct StoreData {
    version: u32,
    tables: BTreeMap<String, Vec<Record>>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            tables: BTreeMap::new(),
        }
    }
}

/// The metadata blob persisted under the `meta` key.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreMeta {
    #[serde(default)]
    pub seeded: bool,
    #[serde(default)]
    pub current_user: Option<Value>,
}

/// Current timestamp in the store's wire format (RFC 3339, microseconds).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ============================================================================
// RECORD STORE
// ============================================================================

pub struct RecordStore {
    data: StoreData,
    meta: StoreMeta,
    backend: Box<dyn PersistenceBackend>,
    /// Set once the durable backing has failed; writes continue in memory
    /// only and the warning is not repeated.
    degraded: bool,
}

impl RecordStore {
    /// Open the store over a backend, loading both durable keys.
    ///
    /// A missing blob starts the store empty; an unreadable backing degrades
    /// to in-memory-only operation for this session rather than failing.
    pub fn open(backend: Box<dyn PersistenceBackend>) -> Self {
        let mut degraded = false;

        let data = match backend.load(STORE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<StoreData>(&blob) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("Store blob unreadable, starting empty: {}", e);
                    StoreData::default()
                }
            },
            Ok(None) => StoreData::default(),
            Err(e) => {
                log::warn!("Storage unavailable, running in-memory only: {}", e);
                degraded = true;
                StoreData::default()
            }
        };

        let meta = match backend.load(META_KEY) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_default(),
            _ => StoreMeta::default(),
        };

        log::info!(
            "Record store opened: {} tables, seeded={}",
            data.tables.len(),
            meta.seeded
        );

        Self {
            data,
            meta,
            backend,
            degraded,
        }
    }

    /// Store over the in-memory backend. Used by tests and as a fallback.
    pub fn in_memory() -> Self {
        Self::open(Box::new(crate::store::backend::MemoryBackend::new()))
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// Up to `limit` records from `table`, ordered by `sort` (field name,
    /// `-` prefix descending). The sort is stable: ties keep insertion order.
    pub fn list(&self, table: &str, sort: Option<&str>, limit: Option<usize>) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .data
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default();

        if let Some(sort) = sort {
            let spec = SortSpec::parse(sort);
            records.sort_by(|a, b| {
                let ord = value_cmp(a.get(spec.field), b.get(spec.field));
                if spec.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        if let Some(limit) = limit {
            records.truncate(limit);
        }
        records
    }

    /// Records matching the `where` clause, then sorted and capped like
    /// `list`. All conditions are ANDed; an empty clause matches everything.
    pub fn filter(
        &self,
        table: &str,
        clause: &Where,
        sort: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .data
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| clause.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(sort) = sort {
            let spec = SortSpec::parse(sort);
            records.sort_by(|a, b| {
                let ord = value_cmp(a.get(spec.field), b.get(spec.field));
                if spec.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        if let Some(limit) = limit {
            records.truncate(limit);
        }
        records
    }

    /// Find one record by id.
    pub fn get(&self, table: &str, id: &str) -> Option<Record> {
        self.data
            .tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| record_id(r) == Some(id)))
            .cloned()
    }

    /// Create a record: store-assigned id, both timestamps set to now, then
    /// caller fields merged over the defaults. Callers may override the
    /// timestamps (the prediction generator backdates alerts) but never the
    /// id.
    pub fn create(&mut self, table: &str, data: Record) -> StoreResult<Record> {
        let now = now_iso();
        let mut record = Record::new();
        record.insert("created_date".to_string(), Value::String(now.clone()));
        record.insert("updated_date".to_string(), Value::String(now));
        for (key, value) in data {
            record.insert(key, value);
        }
        record.insert(
            "id".to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );

        self.data
            .tables
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        self.persist();
        Ok(record)
    }

    /// Shallow-merge `patch` onto the record with `id`, refresh
    /// `updated_date`, persist, return the updated record.
    ///
    /// The merge is deliberately shallow: list and object fields are
    /// replaced wholesale (callers rely on this to swap `ai_analysis`).
    pub fn update(&mut self, table: &str, id: &str, patch: Record) -> StoreResult<Record> {
        let rows = self
            .data
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::not_found(table, id))?;
        let record = rows
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or_else(|| StoreError::not_found(table, id))?;

        for (key, value) in patch {
            record.insert(key, value);
        }
        record.insert("id".to_string(), Value::String(id.to_string()));
        record.insert("updated_date".to_string(), Value::String(now_iso()));

        let updated = record.clone();
        self.persist();
        Ok(updated)
    }

    /// Remove the record with `id` if present. Success either way.
    pub fn delete(&mut self, table: &str, id: &str) -> StoreResult<()> {
        if let Some(rows) = self.data.tables.get_mut(table) {
            let before = rows.len();
            rows.retain(|r| record_id(r) != Some(id));
            if rows.len() != before {
                self.persist();
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // METADATA
    // ------------------------------------------------------------------

    pub fn meta(&self) -> &StoreMeta {
        &self.meta
    }

    pub fn set_seeded(&mut self, seeded: bool) {
        self.meta.seeded = seeded;
        self.persist_meta();
    }

    pub fn set_current_user(&mut self, user: Option<Value>) {
        self.meta.current_user = user;
        self.persist_meta();
    }

    /// Whole-store dump in the persisted blob shape `{ tables, version }`.
    pub fn dump(&self) -> StoreResult<serde_json::Value> {
        Ok(serde_json::to_value(&self.data)?)
    }

    /// Replace all tables from a previously dumped blob and persist.
    pub fn restore(&mut self, blob: serde_json::Value) -> StoreResult<()> {
        self.data = serde_json::from_value(blob)?;
        self.persist();
        log::info!("Record store restored: {} tables", self.data.tables.len());
        Ok(())
    }

    /// Clear all tables and metadata and persist the empty state.
    pub fn reset(&mut self) {
        self.data = StoreData::default();
        self.meta = StoreMeta::default();
        self.persist();
        self.persist_meta();
        log::info!("Record store reset");
    }

    // ------------------------------------------------------------------
    // PERSISTENCE
    // ------------------------------------------------------------------

    /// Serialize the whole store to the durable key. A failing backend
    /// degrades the session to in-memory operation; it does not fail the
    /// mutating call that triggered the write.
    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.data) {
            Ok(blob) => blob,
            Err(e) => {
                log::error!("Store serialization failed, skipping persist: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.save(STORE_KEY, &blob) {
            if !self.degraded {
                log::warn!("Persist failed, continuing in-memory only: {}", e);
                self.degraded = true;
            }
        }
    }

    fn persist_meta(&mut self) {
        let blob = match serde_json::to_string(&self.meta) {
            Ok(blob) => blob,
            Err(e) => {
                log::error!("Meta serialization failed, skipping persist: {}", e);
                return;
            }
        };
        if let Err(e) = self.backend.save(META_KEY, &blob) {
            if !self.degraded {
                log::warn!("Persist failed, continuing in-memory only: {}", e);
                self.degraded = true;
            }
        }
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::FileBackend;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_create_then_list_includes_record() {
        let mut store = RecordStore::in_memory();
        let created = store
            .create("incident", record(json!({"title": "DB outage", "severity": "critical"})))
            .unwrap();

        assert!(created.get("id").unwrap().as_str().is_some());
        assert!(created.get("created_date").unwrap().as_str().is_some());
        assert_eq!(created.get("title").unwrap(), "DB outage");

        let listed = store.list("incident", None, None);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut store = RecordStore::in_memory();
        let err = store
            .update("incident", "nope", record(json!({"status": "resolved"})))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_update_shallow_merges_and_bumps_updated_date() {
        let mut store = RecordStore::in_memory();
        let created = store
            .create(
                "incident",
                record(json!({"title": "Login failures", "affected_systems": ["Auth Service"]})),
            )
            .unwrap();
        let id = created.get("id").unwrap().as_str().unwrap().to_string();
        let before = created.get("updated_date").unwrap().as_str().unwrap().to_string();

        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = store
            .update(
                "incident",
                &id,
                record(json!({"affected_systems": ["Auth Service", "SSO Proxy"]})),
            )
            .unwrap();

        // Shallow merge: the list was replaced wholesale, title untouched
        assert_eq!(
            updated.get("affected_systems").unwrap(),
            &json!(["Auth Service", "SSO Proxy"])
        );
        assert_eq!(updated.get("title").unwrap(), "Login failures");
        assert_eq!(updated.get("created_date"), created.get("created_date"));

        let after = updated.get("updated_date").unwrap().as_str().unwrap();
        assert!(after > before.as_str());
    }

    #[test]
    fn test_sort_by_created_date_descending() {
        let mut store = RecordStore::in_memory();
        for (i, title) in ["first", "second", "third"].iter().enumerate() {
            // Explicit timestamps: creation in the same microsecond would
            // otherwise make the order ambiguous
            store
                .create(
                    "incident",
                    record(json!({
                        "title": title,
                        "created_date": format!("2026-08-30T10:0{}:00.000000Z", i)
                    })),
                )
                .unwrap();
        }

        let listed = store.list("incident", Some("-created_date"), None);
        let titles: Vec<&str> = listed
            .iter()
            .map(|r| r.get("title").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_list_caps_at_limit() {
        let mut store = RecordStore::in_memory();
        for i in 0..5 {
            store
                .create("audit_log", record(json!({"action_type": format!("step_{i}")})))
                .unwrap();
        }
        assert_eq!(store.list("audit_log", None, Some(3)).len(), 3);
    }

    #[test]
    fn test_filter_equality_returns_exact_subset() {
        let mut store = RecordStore::in_memory();
        store
            .create("incident", record(json!({"title": "a", "severity": "critical"})))
            .unwrap();
        store
            .create("incident", record(json!({"title": "b", "severity": "high"})))
            .unwrap();
        store
            .create("incident", record(json!({"title": "c", "severity": "critical"})))
            .unwrap();

        let clause = Where::new().eq("severity", "critical");
        let matched = store.filter("incident", &clause, None, None);
        assert_eq!(matched.len(), 2);
        assert!(matched
            .iter()
            .all(|r| r.get("severity").unwrap() == "critical"));
    }

    #[test]
    fn test_delete_missing_id_is_ok() {
        let mut store = RecordStore::in_memory();
        store.delete("incident", "ghost").unwrap();

        let created = store
            .create("incident", record(json!({"title": "x"})))
            .unwrap();
        let id = created.get("id").unwrap().as_str().unwrap().to_string();
        store.delete("incident", &id).unwrap();
        assert!(store.list("incident", None, None).is_empty());
    }

    #[test]
    fn test_caller_supplied_created_date_wins_but_id_never_does() {
        let mut store = RecordStore::in_memory();
        let created = store
            .create(
                "predictive_alert",
                record(json!({
                    "id": "forged",
                    "created_date": "2026-08-29T12:00:00.000000Z",
                    "predicted_issue": "capacity"
                })),
            )
            .unwrap();

        assert_eq!(
            created.get("created_date").unwrap(),
            "2026-08-29T12:00:00.000000Z"
        );
        assert_ne!(created.get("id").unwrap(), "forged");
    }

    #[test]
    fn test_persists_across_reopen_with_file_backend() {
        let tmp = tempfile::tempdir().unwrap();

        let id = {
            let backend = FileBackend::new(tmp.path().to_path_buf());
            let mut store = RecordStore::open(Box::new(backend));
            let created = store
                .create("incident", record(json!({"title": "survives reload"})))
                .unwrap();
            store.set_seeded(true);
            created.get("id").unwrap().as_str().unwrap().to_string()
        };

        let backend = FileBackend::new(tmp.path().to_path_buf());
        let store = RecordStore::open(Box::new(backend));
        let found = store.get("incident", &id).expect("record survives reopen");
        assert_eq!(found.get("title").unwrap(), "survives reload");
        assert!(store.meta().seeded);
    }

    #[test]
    fn test_dump_restore_round_trip() {
        let mut store = RecordStore::in_memory();
        store
            .create("incident", record(json!({"title": "kept"})))
            .unwrap();
        let blob = store.dump().unwrap();
        assert_eq!(blob["version"], 1);

        let mut other = RecordStore::in_memory();
        other.restore(blob).unwrap();
        assert_eq!(other.list("incident", None, None).len(), 1);
    }

    #[test]
    fn test_reset_clears_tables_and_meta() {
        let mut store = RecordStore::in_memory();
        store.create("incident", record(json!({"title": "x"}))).unwrap();
        store.set_seeded(true);

        store.reset();
        assert!(store.list("incident", None, None).is_empty());
        assert!(!store.meta().seeded);
    }
}
