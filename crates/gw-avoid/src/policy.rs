//! The `AvoidancePolicy` trait: the pluggable per-step decision.

use gw_world::AgentState;

use crate::Decision;

/// Decides an agent's next step from its own row and everyone else's.
///
/// # Contract
///
/// - `me` is a fresh copy of the deciding agent's row, read under the gate.
/// - `others` holds the other agents' rows from the same critical section.
///   Callers usually pass only active agents; implementations still ignore
///   inactive rows and any row carrying `me.id`.
/// - The result must be a pure function of the inputs.  No sleeping, no
///   locking, no I/O.
///
/// # Thread safety
///
/// One policy instance is shared by every agent thread, so implementations
/// must be `Send + Sync`.
pub trait AvoidancePolicy: Send + Sync + 'static {
    fn decide(&self, me: &AgentState, others: &[AgentState]) -> Decision;
}
