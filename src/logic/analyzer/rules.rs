//! Analyzer Rules & Thresholds
//!
//! Every threshold, keyword set, and delta the heuristic uses, as named
//! constants. No logic here; changing a value here changes analyzer output
//! for every incident, so treat these as part of the persisted contract.

use crate::entities::Severity;

// ============================================================================
// KEYWORD SIGNALS
// ============================================================================

/// Text markers for authentication trouble
pub const AUTH_KEYWORDS: &[&str] = &["auth", "login", "token", "sso"];

/// Text markers for datastore trouble
pub const DB_KEYWORDS: &[&str] = &["db", "database", "postgres", "mysql", "query", "timeout"];

/// Text markers for API/edge trouble ("timeout" intentionally overlaps DB)
pub const API_KEYWORDS: &[&str] = &["api", "5xx", "gateway", "latency", "timeout"];

// ============================================================================
// CONFIDENCE
// ============================================================================

pub const BASE_CONFIDENCE_CRITICAL: f64 = 0.78;
pub const BASE_CONFIDENCE_HIGH: f64 = 0.72;
pub const BASE_CONFIDENCE_MEDIUM: f64 = 0.66;
pub const BASE_CONFIDENCE_LOW: f64 = 0.60;

/// Descriptions at or under this length cost `DATA_QUALITY_PENALTY`
pub const SHORT_DESCRIPTION_MAX: usize = 40;
pub const DATA_QUALITY_PENALTY: f64 = 0.08;

// ============================================================================
// ROOT-CAUSE / RECOMMENDATION TEMPLATES
// ============================================================================

/// Base probability of the datastore cause, nudged by `DB_SIGNAL_DELTA`
pub const DB_CAUSE_BASE: f64 = 0.45;
pub const DB_SIGNAL_DELTA: f64 = 0.15;

pub const AUTH_CAUSE_BASE: f64 = 0.35;
pub const AUTH_SIGNAL_DELTA: f64 = 0.20;

pub const API_CAUSE_BASE: f64 = 0.40;
pub const API_SIGNAL_DELTA: f64 = 0.15;

// ============================================================================
// LOOKUPS
// ============================================================================

/// Severity-driven starting confidence.
pub fn base_confidence(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => BASE_CONFIDENCE_CRITICAL,
        Severity::High => BASE_CONFIDENCE_HIGH,
        Severity::Medium => BASE_CONFIDENCE_MEDIUM,
        Severity::Low => BASE_CONFIDENCE_LOW,
    }
}

/// Severity-driven recovery estimate shown to stakeholders.
pub fn estimated_recovery_time(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "30–90 minutes",
        Severity::High => "1–3 hours",
        _ => "Same day",
    }
}

/// All probability and score values stay inside [0, 1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_confidence_table() {
        assert_eq!(base_confidence(Severity::Critical), 0.78);
        assert_eq!(base_confidence(Severity::High), 0.72);
        assert_eq!(base_confidence(Severity::Medium), 0.66);
        assert_eq!(base_confidence(Severity::Low), 0.60);
    }

    #[test]
    fn test_recovery_time_table() {
        assert_eq!(estimated_recovery_time(Severity::Critical), "30–90 minutes");
        assert_eq!(estimated_recovery_time(Severity::High), "1–3 hours");
        assert_eq!(estimated_recovery_time(Severity::Medium), "Same day");
        assert_eq!(estimated_recovery_time(Severity::Low), "Same day");
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(1.2), 1.0);
        assert_eq!(clamp01(-0.1), 0.0);
        assert_eq!(clamp01(0.6), 0.6);
    }
}
