//! Heuristic incident analyzer: keyword signals, templated causes and
//! recommendations, severity-driven confidence.

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{analyze, classify_signals};
pub use types::{Analysis, Recommendation, RootCause, Signals};
