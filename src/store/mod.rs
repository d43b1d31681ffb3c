//! Record store and persistence backends

pub mod backend;
pub mod matcher;
pub mod records;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

pub use backend::{FileBackend, MemoryBackend, PersistenceBackend};
pub use matcher::{Matcher, SortSpec, Where};
pub use records::{now_iso, RecordStore, StoreMeta};

/// A dynamic record: one entity instance as stored in a table.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Process-global store over the platform data dir.
///
/// Convenience for binary use; library callers construct their own
/// `RecordStore` with an injected backend instead.
static GLOBAL: Lazy<Mutex<RecordStore>> =
    Lazy::new(|| Mutex::new(RecordStore::open(Box::new(FileBackend::default_dir()))));

pub fn global() -> &'static Mutex<RecordStore> {
    &GLOBAL
}
