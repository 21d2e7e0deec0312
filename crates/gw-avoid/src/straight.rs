//! A baseline policy with no avoidance at all.

use gw_world::AgentState;

use crate::{AvoidancePolicy, Decision, Route};

/// An [`AvoidancePolicy`] that always takes the direct step and ignores every
/// other agent.
///
/// Useful as a baseline and in tests that exercise the controller loop
/// without contention.
pub struct StraightLine;

impl AvoidancePolicy for StraightLine {
    fn decide(&self, me: &AgentState, _others: &[AgentState]) -> Decision {
        if me.at_target() {
            return Decision::Arrived;
        }
        Decision::Moved {
            to:    me.position + me.position.step_toward(me.target),
            route: Route::Direct,
        }
    }
}
