//! Dispatch surface consumed by the dashboard

pub mod commands;

pub use commands::{invoke, OPERATIONS};
