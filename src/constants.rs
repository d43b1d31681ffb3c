//! Central Configuration Constants
//!
//! Single source of truth for store-wide defaults. Heuristic thresholds live
//! next to the logic that uses them (see `logic::analyzer::rules`).

/// App name
pub const APP_NAME: &str = "Incident Desk";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under the local data dir holding the durable keys
pub const DATA_DIR: &str = "incident-desk";

/// Durable key holding the whole-store blob `{ tables, version }`
pub const STORE_KEY: &str = "store";

/// Durable key holding the metadata blob `{ seeded, current_user }`
pub const META_KEY: &str = "meta";

/// Persisted blob format version
pub const STORE_VERSION: u32 = 1;

/// Default sort for entity reads (newest first)
pub const DEFAULT_SORT: &str = "-created_date";

/// Default record cap for `list`
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Default record cap for `filter`
pub const DEFAULT_FILTER_LIMIT: usize = 1000;

// ============================================
// Stubbed single-user identity
// ============================================

/// Fixed operator id (no real authentication in this system)
pub const DEFAULT_USER_ID: &str = "usr-local-operator";

/// Fixed operator email
pub const DEFAULT_USER_EMAIL: &str = "operator@incident-desk.local";

/// Fixed operator display name
pub const DEFAULT_USER_NAME: &str = "Local Operator";

/// Get the data directory from environment or use the platform default
pub fn data_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("INCIDENT_DESK_DATA_DIR") {
        return std::path::PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(DATA_DIR)
}
