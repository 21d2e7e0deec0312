//! Greedy straight-line stepping with priority arbitration and sidesteps.
//!
//! # Algorithm
//!
//! ```text
//! if position == target                         → Arrived
//! step      = signum(target - position) per axis
//! candidate = position + step
//! conflicts = active others within safe_distance of candidate
//! if conflicts is empty                         → Moved(candidate)
//! if any conflict has a lower id than me        → Blocked(Yield)
//! for alt in [(dx,0), (0,dy), (-dx,0), (0,-dy)]:
//!     skip zero and off-field alternates
//!     if no active other within safe_distance   → Moved(position + alt)
//!                                               → Blocked(Gridlock)
//! ```
//!
//! # Priority
//!
//! Lower id wins.  The whole conflict set is computed before deciding, so in
//! a three-or-more-way conflict the agent yields if *any* conflicting agent
//! outranks it.  Only the lowest id in a conflict set ever sidesteps, no
//! matter how the table is ordered.  In a head-on conflict between two agents
//! exactly one yields and the other proceeds or sidesteps, which rules out
//! the symmetric live-lock where both back off forever.
//!
//! # Detours
//!
//! There is no memory between steps.  After a sidestep the next step is
//! recomputed from scratch toward the original target, so a detour can
//! permanently bend the path.

use gw_core::{AgentId, GridPos, SimConfig};
use gw_world::AgentState;

use crate::{AvoidancePolicy, BlockReason, Decision, Route};

/// The default [`AvoidancePolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedySidestep {
    /// Agents strictly closer than this are in conflict.
    pub safe_distance: f64,
    /// Sidesteps that would leave `[0, field_size)²` are unsafe.
    pub field_size:    i32,
}

impl GreedySidestep {
    pub fn new(safe_distance: f64, field_size: i32) -> Self {
        Self { safe_distance, field_size }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.safe_distance, config.field_size)
    }

    /// Ids of active agents (other than `me`) too close to `cell`.
    fn conflicts<'a>(
        &'a self,
        me:     AgentId,
        cell:   GridPos,
        others: &'a [AgentState],
    ) -> impl Iterator<Item = AgentId> + 'a {
        others
            .iter()
            .filter(move |o| o.active && o.id != me)
            .filter(move |o| cell.euclidean(o.position) < self.safe_distance)
            .map(|o| o.id)
    }

    fn is_safe(&self, me: AgentId, cell: GridPos, others: &[AgentState]) -> bool {
        cell.in_bounds(self.field_size) && self.conflicts(me, cell, others).next().is_none()
    }
}

impl AvoidancePolicy for GreedySidestep {
    fn decide(&self, me: &AgentState, others: &[AgentState]) -> Decision {
        if me.at_target() {
            return Decision::Arrived;
        }

        let step = me.position.step_toward(me.target);
        let candidate = me.position + step;

        let Some(top) = self.conflicts(me.id, candidate, others).min() else {
            return Decision::Moved { to: candidate, route: Route::Direct };
        };

        if top < me.id {
            return Decision::Blocked(BlockReason::Yield { to: top });
        }

        step.sidesteps()
            .into_iter()
            .filter(|alt| !alt.is_zero())
            .find(|&alt| self.is_safe(me.id, me.position + alt, others))
            .map_or(Decision::Blocked(BlockReason::Gridlock), |alt| Decision::Moved {
                to:    me.position + alt,
                route: Route::Sidestep(alt),
            })
    }
}
