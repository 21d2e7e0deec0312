//! The outcome of one avoidance decision.

use gw_core::{AgentId, GridPos, Step};

/// What the agent should do this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The agent already stands on its target; mark it inactive.
    Arrived,

    /// Commit `to` as the agent's new position.
    Moved { to: GridPos, route: Route },

    /// Stay put and retry after the pause matching the reason.
    Blocked(BlockReason),
}

/// Which branch produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The unit step straight toward the target.
    Direct,
    /// A single-axis fallback taken because the direct step was unsafe.
    Sidestep(Step),
}

/// Why an agent could not move.  The two reasons get different pauses and
/// must stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// A conflicting agent with a lower id has priority.  `to` is the lowest
    /// such id.  Followed by a randomized backoff.
    Yield { to: AgentId },

    /// This agent had priority but neither the direct step nor any sidestep
    /// was safe.  Followed by a fixed pause.
    Gridlock,
}

impl Decision {
    /// The new position, if this decision moves the agent.
    pub fn destination(&self) -> Option<GridPos> {
        match self {
            Decision::Moved { to, .. } => Some(*to),
            _ => None,
        }
    }
}
