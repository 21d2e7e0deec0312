//! The `Renderer` trait: the output sink called after each move.

use gw_world::AgentState;

/// Receives read-only copies of the world table.
///
/// Called from agent threads, so implementations must be `Send + Sync`.  The
/// snapshot is copied while the gate is held and delivered after release, so
/// a slow renderer delays only the agent that moved, never the others.
///
/// Methods return nothing; sinks that can fail keep their own error state.
///
/// # Example: move counter
///
/// ```rust,ignore
/// struct Counter(AtomicUsize);
///
/// impl Renderer for Counter {
///     fn show(&self, _snapshot: &[AgentState]) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait Renderer: Send + Sync {
    /// Called after every committed move with all agents' rows in id order.
    fn show(&self, snapshot: &[AgentState]);

    /// Called once when an agent reaches its target and goes inactive.
    fn on_arrival(&self, _agent: &AgentState) {}

    /// Called once after every agent has been joined.
    fn on_finish(&self, _final_state: &[AgentState]) {}
}

/// A [`Renderer`] that does nothing.
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn show(&self, _snapshot: &[AgentState]) {}
}
