//! Hypotheses: the unit of engine output.

use serde::{Deserialize, Serialize};

use crate::scoring::ConfidenceTier;

/// One candidate explanation for an observed failure.
///
/// Built by a rule through [`HypothesisBuilder`]; `rank` stays `0` until the
/// engine sorts the full result set and assigns positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    #[serde(default)]
    pub rank: usize,
    pub confidence: f64,
    pub component: String,
    pub issue: String,
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub suggestion: String,
}

impl Hypothesis {
    pub fn builder(component: impl Into<String>, issue: impl Into<String>) -> HypothesisBuilder {
        HypothesisBuilder {
            component: component.into(),
            issue: issue.into(),
            suggestion: String::new(),
            evidence: Vec::new(),
            tier: ConfidenceTier::Low,
        }
    }
}

/// Accumulates evidence lines and keeps the strongest tier seen.
#[derive(Debug, Clone)]
pub struct HypothesisBuilder {
    component: String,
    issue: String,
    suggestion: String,
    evidence: Vec<String>,
    tier: ConfidenceTier,
}

impl HypothesisBuilder {
    pub fn suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    /// Record one corroborating signal and raise confidence to `tier` if stronger.
    pub fn evidence(&mut self, tier: ConfidenceTier, line: impl Into<String>) -> &mut Self {
        self.evidence.push(line.into());
        self.tier = self.tier.max(tier);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.evidence.is_empty()
    }

    pub fn build(self) -> Hypothesis {
        Hypothesis {
            rank: 0,
            confidence: self.tier.value(),
            component: self.component,
            issue: self.issue,
            evidence: self.evidence,
            suggestion: self.suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_strongest_tier() {
        let mut b = Hypothesis::builder("Storage", "claim unbound");
        b.evidence(ConfidenceTier::StatusOnly, "PVC default/a: Status=Pending");
        b.evidence(ConfidenceTier::EventAndStatus, "Event on PVC a");
        b.evidence(ConfidenceTier::ConditionOnly, "PVC default/b: condition");
        let h = b.build();

        assert_eq!(h.confidence, 0.8);
        assert_eq!(h.evidence.len(), 3);
        assert_eq!(h.rank, 0);
    }

    #[test]
    fn evidence_keeps_insertion_order() {
        let mut b = Hypothesis::builder("Dataset", "not bound");
        b.evidence(ConfidenceTier::StatusOnly, "first")
            .evidence(ConfidenceTier::StatusOnly, "second");
        assert_eq!(b.build().evidence, vec!["first", "second"]);
    }

    #[test]
    fn empty_builder_falls_back_to_low() {
        let b = Hypothesis::builder("Fuse", "x");
        assert!(b.is_empty());
        assert_eq!(b.build().confidence, ConfidenceTier::Low.value());
    }

    #[test]
    fn serializes_with_empty_evidence() {
        let h = Hypothesis::builder("Runtime", "partial")
            .suggestion("check pods")
            .build();
        let value = serde_json::to_value(&h).unwrap();
        assert_eq!(value["evidence"], serde_json::json!([]));
        assert_eq!(value["suggestion"], "check pods");
        assert_eq!(value["rank"], 0);
    }
}
