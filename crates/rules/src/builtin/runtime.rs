//! Runtimes whose master or worker sets are only partly ready.

use diagnoser_core::{ConfidenceTier, Hypothesis, RuntimeInfo, Snapshot};

use crate::rule::Rule;

pub struct RuntimePartiallyReadyRule;

const ISSUE: &str =
    "Runtime is only partially ready, indicating dependency or configuration failure";
const SUGGESTION: &str = "Check runtime pod logs for errors. Verify storage backend \
connectivity and credentials. Ensure all required dependencies are available.";

fn degraded(runtime: &RuntimeInfo) -> bool {
    runtime.masters_short() || runtime.workers_short() || runtime.not_ready().next().is_some()
}

impl Rule for RuntimePartiallyReadyRule {
    fn id(&self) -> &'static str {
        "runtime-partially-ready"
    }

    fn component(&self) -> &'static str {
        "Runtime"
    }

    fn matches(&self, snapshot: &Snapshot) -> bool {
        snapshot.graph.runtimes.values().any(degraded)
    }

    fn hypothesis(&self, snapshot: &Snapshot) -> Hypothesis {
        let mut h = Hypothesis::builder(self.component(), ISSUE).suggestion(SUGGESTION);

        for (name, rt) in &snapshot.graph.runtimes {
            if rt.masters_short() {
                h.evidence(
                    ConfidenceTier::StatusOnly,
                    format!(
                        "Runtime {}/{}: Master {}/{} ready",
                        rt.namespace, name, rt.master_ready, rt.master_replicas
                    ),
                );
            }
            if rt.workers_short() {
                h.evidence(
                    ConfidenceTier::StatusOnly,
                    format!(
                        "Runtime {}/{}: Worker {}/{} ready",
                        rt.namespace, name, rt.worker_ready, rt.worker_replicas
                    ),
                );
            }
            // Once degraded, every False condition is cited, not only Ready.
            if !degraded(rt) {
                continue;
            }
            for cond in rt.conditions.iter().filter(|c| c.is_false()) {
                let tier = if cond.reason.is_empty() {
                    ConfidenceTier::ConditionOnly
                } else {
                    ConfidenceTier::EventAndStatus
                };
                h.evidence(
                    tier,
                    format!(
                        "Runtime {}/{}: Condition {}={}, reason={}",
                        rt.namespace, name, cond.kind, cond.status, cond.reason
                    ),
                );
            }
        }

        h.build()
    }
}
