//! Incident Desk Core
//!
//! Record store, typed entity layer, and deterministic heuristic generators
//! backing the incident-tracking dashboard. Everything here is local: records
//! live in a whole-blob JSON store behind an injectable persistence backend,
//! and every "AI" generator is a pure function of its inputs plus the current
//! store snapshot.

pub mod api;
pub mod constants;
pub mod entities;
pub mod error;
pub mod identity;
pub mod logic;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::RecordStore;
