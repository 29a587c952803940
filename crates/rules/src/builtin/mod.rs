//! Built-in rules, one per subsystem and failure mode.
//!
//! Every rule follows the same shape: a predicate shared by `matches` and
//! `hypothesis` so the two never disagree, and a builder that records one
//! evidence line per resource or event with the tier it earns.

mod dataset;
mod fuse;
mod runtime;
mod storage;
mod worker;

pub use dataset::DatasetNotBoundRule;
pub use fuse::FuseUnschedulableRule;
pub use runtime::RuntimePartiallyReadyRule;
pub use storage::PvcUnboundRule;
pub use worker::WorkerPendingMemoryRule;

use diagnoser_core::{Event, PodInfo, Snapshot};

pub(crate) const ROLE_FUSE: &str = "fuse";
pub(crate) const ROLE_WORKER: &str = "worker";

/// Pending pods playing `role`, in name order.
pub(crate) fn pending_pods_with_role<'a>(
    snapshot: &'a Snapshot,
    role: &'a str,
) -> impl Iterator<Item = (&'a String, &'a PodInfo)> + 'a {
    snapshot
        .graph
        .pods
        .iter()
        .filter(move |(_, pod)| pod.is_pending() && pod.has_role(role))
}

/// Warning event raised by the scheduler for a pod it could not place.
pub(crate) fn is_failed_scheduling(event: &Event) -> bool {
    event.is_warning() && event.reason.contains("FailedScheduling")
}
