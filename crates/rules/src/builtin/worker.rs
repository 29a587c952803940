//! Worker pods stuck pending because no node has enough free memory.

use diagnoser_core::{contains_ignore_case, Condition, ConfidenceTier, Event, Hypothesis, Snapshot};

use super::{is_failed_scheduling, pending_pods_with_role, ROLE_WORKER};
use crate::rule::Rule;

pub struct WorkerPendingMemoryRule;

const ISSUE: &str = "Worker pod cannot be scheduled due to insufficient memory";
const SUGGESTION: &str = "Reduce worker memory requests, add nodes with more memory, \
or scale down other workloads to free resources.";

fn memory_rejection(cond: &Condition) -> bool {
    contains_ignore_case(&cond.message, "memory") || contains_ignore_case(&cond.message, "insufficient")
}

fn worker_memory_event(event: &Event) -> bool {
    is_failed_scheduling(event)
        && event.object_name_contains(ROLE_WORKER)
        && contains_ignore_case(&event.message, "memory")
}

impl Rule for WorkerPendingMemoryRule {
    fn id(&self) -> &'static str {
        "worker-pending-memory"
    }

    fn component(&self) -> &'static str {
        "Worker"
    }

    fn matches(&self, snapshot: &Snapshot) -> bool {
        pending_pods_with_role(snapshot, ROLE_WORKER)
            .any(|(_, pod)| pod.scheduling_failures().any(memory_rejection))
            || snapshot.warnings().any(worker_memory_event)
    }

    fn hypothesis(&self, snapshot: &Snapshot) -> Hypothesis {
        let mut h = Hypothesis::builder(self.component(), ISSUE).suggestion(SUGGESTION);
        let mut starved = Vec::new();

        for (name, pod) in pending_pods_with_role(snapshot, ROLE_WORKER) {
            let mut cited = false;
            for cond in pod.scheduling_failures().filter(|c| memory_rejection(c)) {
                // Pending phase plus the scheduler's own rejection message.
                h.evidence(
                    ConfidenceTier::EventAndStatus,
                    format!("Pod {}/{}: {}", pod.namespace, name, cond.message),
                );
                cited = true;
            }
            if cited {
                starved.push((pod.namespace.as_str(), name.as_str()));
            }
        }

        for event in snapshot.warnings().filter(|e| worker_memory_event(e)) {
            let tier = if starved.iter().any(|(ns, name)| event.involves(ns, name)) {
                ConfidenceTier::EventAndStatus
            } else {
                ConfidenceTier::EventOnly
            };
            h.evidence(tier, format!("Event: {} - {}", event.reason, event.message));
        }

        h.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::*;

    fn pending_worker(message: &str) -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.graph.pods.insert(
            "mydata-worker-0".to_string(),
            pod(
                "mydata-worker-0",
                "Pending",
                &[("role", "worker")],
                vec![scheduled_false("Unschedulable", message)],
            ),
        );
        snapshot
    }

    #[test]
    fn insufficient_memory_condition() {
        let snapshot = pending_worker("0/3 nodes are available: 3 Insufficient memory.");
        let rule = WorkerPendingMemoryRule;
        assert!(rule.matches(&snapshot));

        let h = rule.hypothesis(&snapshot);
        assert_eq!(h.component, "Worker");
        assert_eq!(h.confidence, 0.8);
        assert_eq!(
            h.evidence,
            vec!["Pod default/mydata-worker-0: 0/3 nodes are available: 3 Insufficient memory."]
        );
    }

    #[test]
    fn unrelated_scheduling_message_does_not_match() {
        let snapshot = pending_worker("node(s) didn't match Pod's node affinity");
        assert!(!WorkerPendingMemoryRule.matches(&snapshot));
    }

    #[test]
    fn memory_event_without_pod_is_event_tier() {
        let mut snapshot = Snapshot::default();
        snapshot.events.push(warning(
            "FailedScheduling",
            "0/2 nodes are available: 2 Insufficient memory.",
            "Pod",
            "mydata-worker-1",
        ));

        let rule = WorkerPendingMemoryRule;
        assert!(rule.matches(&snapshot));
        assert_eq!(rule.hypothesis(&snapshot).confidence, 0.5);
    }

    #[test]
    fn event_for_starved_pod_is_cited_alongside_condition() {
        let mut snapshot = pending_worker("Insufficient memory");
        snapshot.events.push(warning(
            "FailedScheduling",
            "0/2 nodes are available: 2 Insufficient memory.",
            "Pod",
            "mydata-worker-0",
        ));

        let h = WorkerPendingMemoryRule.hypothesis(&snapshot);
        assert_eq!(h.evidence.len(), 2);
        assert_eq!(h.confidence, 0.8);
    }

    #[test]
    fn cpu_event_is_ignored() {
        let mut snapshot = Snapshot::default();
        snapshot.events.push(warning(
            "FailedScheduling",
            "0/2 nodes are available: 2 Insufficient cpu.",
            "Pod",
            "mydata-worker-1",
        ));
        assert!(!WorkerPendingMemoryRule.matches(&snapshot));
    }

    #[test]
    fn fuse_pod_with_memory_pressure_is_not_a_worker() {
        let mut snapshot = Snapshot::default();
        snapshot.graph.pods.insert(
            "mydata-fuse-0".to_string(),
            pod(
                "mydata-fuse-0",
                "Pending",
                &[("role", "fuse")],
                vec![scheduled_false("Unschedulable", "Insufficient memory")],
            ),
        );
        assert!(!WorkerPendingMemoryRule.matches(&snapshot));
    }
}
