//! Point-in-time capture of cluster state handed to the diagnosis engine.
//!
//! The collector materializes everything up front: resource records keyed by
//! name, the cluster event stream, and raw component logs. Field names follow
//! the collector's camelCase wire format so a dump can be decoded as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pod phase reported by the scheduler before placement succeeds.
pub const STATUS_PENDING: &str = "Pending";
/// Claim status once its bound volume has disappeared.
pub const STATUS_LOST: &str = "Lost";
/// Dataset status while no runtime has bound it.
pub const STATUS_NOT_BOUND: &str = "NotBound";

/// Event type for abnormal cluster events.
pub const EVENT_WARNING: &str = "Warning";

/// Condition type set by the scheduler on every pod.
pub const CONDITION_POD_SCHEDULED: &str = "PodScheduled";
/// Readiness condition used by datasets and runtimes.
pub const CONDITION_READY: &str = "Ready";

// ── Snapshot ────────────────────────────────────────────────────────

/// Immutable view of one namespace's data-orchestration resources.
///
/// Maps are ordered so that every scan over them is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub graph: ResourceGraph,
    /// Pre-digested hints emitted by the collector.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<FailureHint>,
    /// Cluster events in collection order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    /// Component name → raw log text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub logs: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Snapshot {
    /// True when the snapshot carries no resources, events, or logs.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty() && self.events.is_empty() && self.logs.is_empty()
    }

    /// Warning events, in collection order.
    pub fn warnings(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.is_warning())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub cluster_version: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub creation_timestamp: String,
    #[serde(default)]
    pub collector_version: String,
}

/// A hint the collector attached while gathering state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureHint {
    pub name: String,
    pub message: String,
    /// Component the hint was raised for.
    pub source: String,
}

// ── Resource graph ──────────────────────────────────────────────────

/// Resource records keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceGraph {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, NodeInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pods: BTreeMap<String, PodInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pvcs: BTreeMap<String, PvcInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub datasets: BTreeMap<String, DatasetInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub runtimes: BTreeMap<String, RuntimeInfo>,
}

impl ResourceGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.pods.is_empty()
            && self.pvcs.is_empty()
            && self.datasets.is_empty()
            && self.runtimes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<Taint>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub allocatable: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub capacity: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unschedulable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taint {
    pub key: String,
    #[serde(default)]
    pub value: String,
    pub effect: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodInfo {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Pod phase: Pending, Running, Failed, ...
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_references: Vec<OwnerReference>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl PodInfo {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }

    /// `PodScheduled=False` conditions, i.e. the scheduler's rejections.
    pub fn scheduling_failures(&self) -> impl Iterator<Item = &Condition> {
        self.conditions
            .iter()
            .filter(|c| c.kind == CONDITION_POD_SCHEDULED && c.is_false())
    }

    /// Whether this pod plays `role` in a runtime.
    ///
    /// Checked in order: `role=<role>` label, a `fluid.io/<role>` label key,
    /// an owner whose name mentions the role, then the pod name itself.
    pub fn has_role(&self, role: &str) -> bool {
        if self.labels.get("role").is_some_and(|r| r == role) {
            return true;
        }
        if self.labels.contains_key(&format!("fluid.io/{}", role)) {
            return true;
        }
        if self
            .owner_references
            .iter()
            .any(|owner| contains_ignore_case(&owner.name, role))
        {
            return true;
        }
        contains_ignore_case(&self.name, role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvcInfo {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Bound, Pending or Lost.
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub volume_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl PvcInfo {
    /// Pending claims never bound; Lost claims lost their volume.
    pub fn is_unbound(&self) -> bool {
        self.status == STATUS_PENDING || self.status == STATUS_LOST
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Bound or NotBound. Empty means the controller never reported one.
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl DatasetInfo {
    /// An empty status counts as not bound.
    pub fn is_not_bound(&self) -> bool {
        self.status == STATUS_NOT_BOUND || self.status.is_empty()
    }

    pub fn not_ready(&self) -> impl Iterator<Item = &Condition> {
        self.conditions
            .iter()
            .filter(|c| c.kind == CONDITION_READY && c.is_false())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInfo {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Alluxio, JuiceFS, ...
    #[serde(rename = "type", default)]
    pub runtime_type: String,
    #[serde(default)]
    pub master_replicas: i32,
    #[serde(default)]
    pub worker_replicas: i32,
    #[serde(default)]
    pub master_ready: i32,
    #[serde(default)]
    pub worker_ready: i32,
    #[serde(default)]
    pub phase: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fuse_phase: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub fuse_ready: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub fuse_unavailable: i32,
}

impl RuntimeInfo {
    pub fn masters_short(&self) -> bool {
        self.master_replicas > 0 && self.master_ready < self.master_replicas
    }

    pub fn workers_short(&self) -> bool {
        self.worker_replicas > 0 && self.worker_ready < self.worker_replicas
    }

    pub fn not_ready(&self) -> impl Iterator<Item = &Condition> {
        self.conditions
            .iter()
            .filter(|c| c.kind == CONDITION_READY && c.is_false())
    }
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

/// A typed status condition. Conditions carry no ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Condition {
    pub fn is_false(&self) -> bool {
        self.status == "False"
    }
}

// ── Events ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    /// Normal or Warning.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub last_timestamp: String,
    #[serde(default)]
    pub involved_object: ObjectReference,
}

impl Event {
    pub fn is_warning(&self) -> bool {
        self.kind == EVENT_WARNING
    }

    /// Whether this event is about the object `namespace/name`.
    ///
    /// Names must be equal. Namespaces are compared only when both sides
    /// carry one, since collectors often leave it blank on one end.
    pub fn involves(&self, namespace: &str, name: &str) -> bool {
        let obj = &self.involved_object;
        if name.is_empty() || obj.name != name {
            return false;
        }
        namespace.is_empty() || obj.namespace.is_empty() || obj.namespace == namespace
    }

    /// Case-insensitive match on the involved object's name.
    pub fn object_name_contains(&self, fragment: &str) -> bool {
        contains_ignore_case(&self.involved_object.name, fragment)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
}

/// Case-insensitive substring test used for name-based correlation.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ── Tests ───────────────────────────────────────────────────────────
