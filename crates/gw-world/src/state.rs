//! One agent's live row in the world table.

use gw_core::{AgentId, AgentSpec, GridPos};

/// The live state of a single agent.
///
/// `active` starts `true` and flips to `false` exactly once, when the agent
/// stands on its target.  [`WorldState::write`][crate::WorldState::write]
/// refuses any row that would break that rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id:       AgentId,
    pub position: GridPos,
    pub target:   GridPos,
    pub speed:    u32,
    pub active:   bool,
}

impl AgentState {
    /// Fresh, active row built from a spec.
    pub fn new(id: AgentId, spec: &AgentSpec) -> Self {
        Self {
            id,
            position: spec.start,
            target:   spec.target,
            speed:    spec.speed,
            active:   true,
        }
    }

    #[inline]
    pub fn at_target(&self) -> bool {
        self.position == self.target
    }
}
