//! Analyzer Types
//!
//! Data structures only; the heuristic itself lives in `engine`.

use serde::{Deserialize, Serialize};

/// One hypothesized root cause with its heuristic probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCause {
    pub cause: String,
    /// 0..=1, base probability plus the keyword-signal nudge
    pub probability: f64,
    pub evidence: String,
}

/// One recommended action with its heuristic confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    pub priority: String,
    /// 0..=1
    pub confidence: f64,
}

/// The templated "explainability" contract every incident receives.
///
/// Fully deterministic: identical incident input yields byte-identical
/// analysis output. The dashboard relies on that for stable rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub root_causes: Vec<RootCause>,
    pub recommendations: Vec<Recommendation>,
    pub estimated_recovery_time: String,
    pub confidence_score: f64,
    pub data_quality_notes: String,
    pub limitations: Vec<String>,
}

/// Keyword classification of the incident text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub is_auth: bool,
    pub is_db: bool,
    pub is_api: bool,
}

impl Signals {
    pub fn any(&self) -> bool {
        self.is_auth || self.is_db || self.is_api
    }

    /// Names of the firing signals, fixed order.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.is_db {
            labels.push("database");
        }
        if self.is_auth {
            labels.push("authentication");
        }
        if self.is_api {
            labels.push("api");
        }
        labels
    }
}
