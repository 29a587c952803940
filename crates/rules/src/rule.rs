//! The contract every diagnostic rule implements.

use diagnoser_core::{Hypothesis, Snapshot};

/// An independent check for one failure mode in one subsystem.
///
/// Rules are stateless and never see each other's output. The engine calls
/// [`Rule::hypothesis`] only after [`Rule::matches`] returned `true`; calling
/// it otherwise is a caller bug and may yield a hypothesis with no evidence.
///
/// Neither method returns an error. Missing or partial data (absent maps,
/// empty conditions) simply does not match.
pub trait Rule: Send + Sync {
    /// Stable unique token, used for logs only.
    fn id(&self) -> &'static str;

    /// Component label every hypothesis from this rule carries.
    fn component(&self) -> &'static str;

    /// Pure predicate. `true` only if [`Rule::hypothesis`] would record at
    /// least one evidence line.
    fn matches(&self, snapshot: &Snapshot) -> bool;

    /// Build exactly one hypothesis, recording every corroborating resource
    /// and event as its own evidence line.
    fn hypothesis(&self, snapshot: &Snapshot) -> Hypothesis;
}
