//! Per-agent and per-run summaries.

use std::time::Duration;

use gw_avoid::Route;
use gw_core::{AgentId, GridPos};
use gw_world::AgentState;

/// What one controller did over its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReport {
    pub id:             AgentId,
    /// Committed moves, direct and sidestep.
    pub moves:          u64,
    /// Committed moves that were sidesteps.
    pub detours:        u64,
    /// Steps blocked by a higher-priority agent.
    pub yields:         u64,
    /// Steps blocked with no safe alternate.
    pub gridlocks:      u64,
    pub final_position: GridPos,
    pub arrived:        bool,
}

impl AgentReport {
    pub(crate) fn new(id: AgentId, position: GridPos) -> Self {
        Self {
            id,
            moves:          0,
            detours:        0,
            yields:         0,
            gridlocks:      0,
            final_position: position,
            arrived:        false,
        }
    }

    pub(crate) fn record_move(&mut self, to: GridPos, route: Route) {
        self.moves += 1;
        if matches!(route, Route::Sidestep(_)) {
            self.detours += 1;
        }
        self.final_position = to;
    }

    /// Every step the controller took, including blocked ones and the final
    /// arrival step.
    pub fn steps(&self) -> u64 {
        self.moves + self.yields + self.gridlocks + u64::from(self.arrived)
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// One entry per agent, ascending id.
    pub agents:            Vec<AgentReport>,
    /// The world table after every agent was joined.
    pub final_state:       Vec<AgentState>,
    pub gate_acquisitions: u64,
    pub elapsed:           Duration,
}

impl SimReport {
    pub fn all_arrived(&self) -> bool {
        self.agents.iter().all(|a| a.arrived) && self.final_state.iter().all(|a| !a.active)
    }

    pub fn total_moves(&self) -> u64 {
        self.agents.iter().map(|a| a.moves).sum()
    }

    pub fn total_steps(&self) -> u64 {
        self.agents.iter().map(AgentReport::steps).sum()
    }
}
