//! Datasets no runtime has bound.

use diagnoser_core::{ConfidenceTier, DatasetInfo, Hypothesis, Snapshot};

use crate::rule::Rule;

pub struct DatasetNotBoundRule;

const ISSUE: &str = "Dataset is not bound, likely due to missing or failed Runtime";
const SUGGESTION: &str = "Ensure a Runtime (e.g., AlluxioRuntime, JuiceFSRuntime) is created \
for this Dataset. Check Runtime status for failures.";

fn unbound(dataset: &DatasetInfo) -> bool {
    dataset.is_not_bound() || dataset.not_ready().next().is_some()
}

impl Rule for DatasetNotBoundRule {
    fn id(&self) -> &'static str {
        "dataset-not-bound"
    }

    fn component(&self) -> &'static str {
        "Dataset"
    }

    fn matches(&self, snapshot: &Snapshot) -> bool {
        snapshot.graph.datasets.values().any(unbound)
    }

    fn hypothesis(&self, snapshot: &Snapshot) -> Hypothesis {
        let mut h = Hypothesis::builder(self.component(), ISSUE).suggestion(SUGGESTION);

        for (name, ds) in &snapshot.graph.datasets {
            if ds.is_not_bound() {
                let status = if ds.status.is_empty() {
                    "<empty>"
                } else {
                    ds.status.as_str()
                };
                h.evidence(
                    ConfidenceTier::StatusOnly,
                    format!("Dataset {}/{}: Status={}", ds.namespace, name, status),
                );
            }
            for cond in ds.not_ready() {
                let tier = if cond.reason.is_empty() {
                    ConfidenceTier::ConditionOnly
                } else {
                    ConfidenceTier::EventAndStatus
                };
                h.evidence(
                    tier,
                    format!(
                        "Dataset {}/{}: Condition Ready={}, reason={}",
                        ds.namespace, name, cond.status, cond.reason
                    ),
                );
            }
        }

        h.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::condition;

    fn dataset(status: &str) -> DatasetInfo {
        DatasetInfo {
            name: "mydata".to_string(),
            namespace: "default".to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn snapshot_with(ds: DatasetInfo) -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.graph.datasets.insert(ds.name.clone(), ds);
        snapshot
    }

    #[test]
    fn not_bound_status() {
        let snapshot = snapshot_with(dataset("NotBound"));
        let rule = DatasetNotBoundRule;
        assert!(rule.matches(&snapshot));

        let h = rule.hypothesis(&snapshot);
        assert_eq!(h.component, "Dataset");
        assert_eq!(h.confidence, 0.6);
        assert_eq!(h.evidence, vec!["Dataset default/mydata: Status=NotBound"]);
    }

    #[test]
    fn empty_status_uses_placeholder() {
        let h = DatasetNotBoundRule.hypothesis(&snapshot_with(dataset("")));
        assert_eq!(h.evidence, vec!["Dataset default/mydata: Status=<empty>"]);
        assert_eq!(h.confidence, 0.6);
    }

    #[test]
    fn bound_dataset_does_not_match() {
        assert!(!DatasetNotBoundRule.matches(&snapshot_with(dataset("Bound"))));
    }

    #[test]
    fn ready_false_with_reason_on_bound_dataset() {
        let mut ds = dataset("Bound");
        ds.conditions
            .push(condition("Ready", "False", "RuntimeNotReady", "runtime is down"));
        let snapshot = snapshot_with(ds);

        let rule = DatasetNotBoundRule;
        assert!(rule.matches(&snapshot));
        let h = rule.hypothesis(&snapshot);
        assert_eq!(h.confidence, 0.8);
        assert_eq!(
            h.evidence,
            vec!["Dataset default/mydata: Condition Ready=False, reason=RuntimeNotReady"]
        );
    }

    #[test]
    fn status_then_bare_condition_keeps_status_tier() {
        let mut ds = dataset("NotBound");
        ds.conditions.push(condition("Ready", "False", "", ""));
        let h = DatasetNotBoundRule.hypothesis(&snapshot_with(ds));
        assert_eq!(h.evidence.len(), 2);
        assert_eq!(h.confidence, 0.6);
    }
}
