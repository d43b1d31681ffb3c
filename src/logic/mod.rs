//! Logic Module - Generators & Workflows
//!
//! Deterministic heuristic generators (analysis, automation, predictions,
//! reviews, suggestions, articles) plus the multi-step user actions that
//! sequence them against the store.

pub mod analyzer;
pub mod articles;
pub mod audit;
pub mod automation;
pub mod predictions;
pub mod review;
pub mod suggestions;
pub mod workflows;
