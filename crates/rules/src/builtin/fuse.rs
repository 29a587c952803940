//! Fuse pods the scheduler cannot place, typically taints without tolerations.

use diagnoser_core::{ConfidenceTier, Event, Hypothesis, PodInfo, Snapshot};

use super::{is_failed_scheduling, pending_pods_with_role, ROLE_FUSE};
use crate::rule::Rule;

pub struct FuseUnschedulableRule;

const ISSUE: &str = "Fuse pod cannot be scheduled due to node taints or missing tolerations";
const SUGGESTION: &str = "Check node taints and ensure Fuse pods have appropriate tolerations. \
Verify node selectors match available nodes.";

fn fuse_event(event: &Event) -> bool {
    is_failed_scheduling(event) && event.object_name_contains(ROLE_FUSE)
}

fn unscheduled(pod: &PodInfo) -> bool {
    pod.scheduling_failures().next().is_some()
}

impl Rule for FuseUnschedulableRule {
    fn id(&self) -> &'static str {
        "fuse-unschedulable"
    }

    fn component(&self) -> &'static str {
        "Fuse"
    }

    fn matches(&self, snapshot: &Snapshot) -> bool {
        pending_pods_with_role(snapshot, ROLE_FUSE).any(|(_, pod)| unscheduled(pod))
            || snapshot.warnings().any(fuse_event)
    }

    fn hypothesis(&self, snapshot: &Snapshot) -> Hypothesis {
        let mut h = Hypothesis::builder(self.component(), ISSUE).suggestion(SUGGESTION);
        let mut stuck = Vec::new();

        for (name, pod) in pending_pods_with_role(snapshot, ROLE_FUSE) {
            for cond in pod.scheduling_failures() {
                let tier = if cond.reason.is_empty() {
                    ConfidenceTier::ConditionOnly
                } else {
                    ConfidenceTier::EventAndStatus
                };
                h.evidence(
                    tier,
                    format!(
                        "Pod {}/{}: PodScheduled=False, reason={}",
                        pod.namespace, name, cond.reason
                    ),
                );
            }
            if unscheduled(pod) {
                stuck.push((pod.namespace.as_str(), name.as_str()));
            }
        }

        for event in snapshot.warnings().filter(|e| fuse_event(e)) {
            let tier = if stuck.iter().any(|(ns, name)| event.involves(ns, name)) {
                ConfidenceTier::EventAndStatus
            } else {
                ConfidenceTier::EventOnly
            };
            h.evidence(tier, format!("Event: {} - {}", event.reason, event.message));
        }

        h.build()
    }
}
