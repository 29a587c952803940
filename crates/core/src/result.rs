//! The ranked diagnosis returned to callers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hypothesis::Hypothesis;

/// Reasoning path that produced a result. Every engine shares the result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    #[default]
    RuleBased,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::RuleBased => write!(f, "rule-based"),
        }
    }
}

/// Ordered hypotheses, ranked 1..N by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    pub generated_at: DateTime<Utc>,
    pub engine: EngineKind,
}

impl DiagnosisResult {
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    /// Highest-ranked hypothesis, if any.
    pub fn top(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }

    /// First hypothesis for `component`.
    pub fn for_component(&self, component: &str) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.component == component)
    }
}
