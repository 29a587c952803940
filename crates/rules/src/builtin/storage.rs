//! Persistent volume claims left unbound by the provisioner.

use diagnoser_core::{ConfidenceTier, Event, Hypothesis, Snapshot};

use crate::rule::Rule;

pub struct PvcUnboundRule;

const ISSUE: &str = "PVC is not bound due to storage provisioning failure";
const SUGGESTION: &str = "Check storage class configuration and provisioner status. \
Verify storage backend has available capacity.";

const PVC_KIND: &str = "PersistentVolumeClaim";

fn provisioning_event(event: &Event) -> bool {
    event.is_warning()
        && event.involved_object.kind == PVC_KIND
        && (event.reason.contains("ProvisioningFailed") || event.reason.contains("FailedBinding"))
}

impl Rule for PvcUnboundRule {
    fn id(&self) -> &'static str {
        "pvc-unbound"
    }

    fn component(&self) -> &'static str {
        "Storage"
    }

    fn matches(&self, snapshot: &Snapshot) -> bool {
        snapshot.graph.pvcs.values().any(|pvc| pvc.is_unbound())
            || snapshot.events.iter().any(provisioning_event)
    }

    fn hypothesis(&self, snapshot: &Snapshot) -> Hypothesis {
        let mut h = Hypothesis::builder(self.component(), ISSUE).suggestion(SUGGESTION);
        let mut unbound = Vec::new();

        for (name, pvc) in &snapshot.graph.pvcs {
            if pvc.is_unbound() {
                h.evidence(
                    ConfidenceTier::StatusOnly,
                    format!("PVC {}/{}: Status={}", pvc.namespace, name, pvc.status),
                );
                unbound.push((pvc.namespace.as_str(), name.as_str()));
            }
        }

        for event in snapshot.events.iter().filter(|e| provisioning_event(e)) {
            let tier = if unbound.iter().any(|(ns, name)| event.involves(ns, name)) {
                ConfidenceTier::EventAndStatus
            } else {
                ConfidenceTier::EventOnly
            };
            h.evidence(
                tier,
                format!(
                    "Event on PVC {}: {} - {}",
                    event.involved_object.name, event.reason, event.message
                ),
            );
        }

        h.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::warning;
    use diagnoser_core::PvcInfo;

    fn snapshot_with(status: &str) -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.graph.pvcs.insert(
            "mydata".to_string(),
            PvcInfo {
                name: "mydata".to_string(),
                namespace: "default".to_string(),
                status: status.to_string(),
                ..Default::default()
            },
        );
        snapshot
    }

    #[test]
    fn pending_claim_is_status_tier() {
        let snapshot = snapshot_with("Pending");
        let rule = PvcUnboundRule;
        assert!(rule.matches(&snapshot));

        let h = rule.hypothesis(&snapshot);
        assert_eq!(h.component, "Storage");
        assert_eq!(h.confidence, 0.6);
        assert_eq!(h.evidence, vec!["PVC default/mydata: Status=Pending"]);
    }

    #[test]
    fn provisioning_event_confirms_pending_claim() {
        let mut snapshot = snapshot_with("Pending");
        snapshot.events.push(warning(
            "ProvisioningFailed",
            "storageclass.storage.k8s.io \"fast\" not found",
            "PersistentVolumeClaim",
            "mydata",
        ));

        let h = PvcUnboundRule.hypothesis(&snapshot);
        assert_eq!(h.confidence, 0.8);
        assert_eq!(h.evidence.len(), 2);
        assert!(h.evidence[1].starts_with("Event on PVC mydata: ProvisioningFailed - "));
    }

    #[test]
    fn lost_claim_is_status_tier() {
        let h = PvcUnboundRule.hypothesis(&snapshot_with("Lost"));
        assert_eq!(h.confidence, 0.6);
        assert_eq!(h.evidence, vec!["PVC default/mydata: Status=Lost"]);
    }

    #[test]
    fn bound_claim_does_not_match() {
        assert!(!PvcUnboundRule.matches(&snapshot_with("Bound")));
    }

    #[test]
    fn event_alone_is_event_tier() {
        let mut snapshot = snapshot_with("Bound");
        snapshot.events.push(warning(
            "FailedBinding",
            "no persistent volumes available",
            "PersistentVolumeClaim",
            "other",
        ));
        let rule = PvcUnboundRule;
        assert!(rule.matches(&snapshot));
        assert_eq!(rule.hypothesis(&snapshot).confidence, 0.5);
    }

    #[test]
    fn event_on_neighbouring_claim_stays_event_tier() {
        let mut snapshot = snapshot_with("Pending");
        snapshot.graph.pvcs.insert(
            "mydata-cache".to_string(),
            PvcInfo {
                name: "mydata-cache".to_string(),
                namespace: "other".to_string(),
                status: "Bound".to_string(),
                ..Default::default()
            },
        );
        let mut event = warning("ProvisioningFailed", "x", "PersistentVolumeClaim", "mydata-cache");
        event.involved_object.namespace = "other".to_string();
        snapshot.events.push(event);

        let h = PvcUnboundRule.hypothesis(&snapshot);
        assert_eq!(h.confidence, 0.6);
        assert_eq!(h.evidence.len(), 2);
    }

    #[test]
    fn same_name_in_other_namespace_stays_event_tier() {
        let mut snapshot = snapshot_with("Pending");
        let mut event = warning("ProvisioningFailed", "x", "PersistentVolumeClaim", "mydata");
        event.involved_object.namespace = "staging".to_string();
        snapshot.events.push(event);

        assert_eq!(PvcUnboundRule.hypothesis(&snapshot).confidence, 0.6);
    }

    #[test]
    fn event_on_other_kind_is_ignored() {
        let mut snapshot = snapshot_with("Bound");
        snapshot
            .events
            .push(warning("ProvisioningFailed", "x", "Pod", "mydata"));
        assert!(!PvcUnboundRule.matches(&snapshot));
    }
}
