//! Confidence tiers shared by every diagnostic rule.
//!
//! Scores are heuristic, not probabilities. A rule never writes a literal
//! confidence: it tags each piece of evidence with the tier that describes
//! how strongly it corroborates the issue, and the hypothesis takes the
//! strongest tier seen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sanctioned evidence-strength tiers, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// An event and the resource's own status both confirm the issue.
    EventAndStatus,
    /// Resource or pod status alone, no corroborating event.
    StatusOnly,
    /// Matched from component logs.
    LogMatch,
    /// A condition is present but carries no reason or message.
    ConditionOnly,
    /// An event matched without status confirmation.
    EventOnly,
    /// Weak or fallback signal.
    Low,
}

/// The policy table, strongest tier first, indexed by tier declaration order.
pub const CONFIDENCE_TABLE: [(ConfidenceTier, f64); 6] = [
    (ConfidenceTier::EventAndStatus, 0.8),
    (ConfidenceTier::StatusOnly, 0.6),
    (ConfidenceTier::LogMatch, 0.55),
    (ConfidenceTier::ConditionOnly, 0.5),
    (ConfidenceTier::EventOnly, 0.5),
    (ConfidenceTier::Low, 0.3),
];

impl ConfidenceTier {
    /// Heuristic score for this tier, looked up in [`CONFIDENCE_TABLE`].
    pub const fn value(self) -> f64 {
        CONFIDENCE_TABLE[self as usize].1
    }

    /// The stronger of two tiers. Ties keep `self`.
    pub fn max(self, other: ConfidenceTier) -> ConfidenceTier {
        if other.value() > self.value() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceTier::EventAndStatus => write!(f, "event+status"),
            ConfidenceTier::StatusOnly => write!(f, "status"),
            ConfidenceTier::LogMatch => write!(f, "log"),
            ConfidenceTier::ConditionOnly => write!(f, "condition"),
            ConfidenceTier::EventOnly => write!(f, "event"),
            ConfidenceTier::Low => write!(f, "low"),
        }
    }
}
