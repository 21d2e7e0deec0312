//! The shared world table.

use gw_core::AgentId;

use crate::{AgentState, WorldError, WorldResult};

/// Ordered table of every agent's live state, indexed by `AgentId`.
///
/// Row `i` always holds the agent with id `i`; rows are never added or
/// removed after construction.  The table itself has no locking.  It is
/// owned by a [`Gate`][crate::Gate] and reached only through a
/// [`GateGuard`][crate::GateGuard], which is what makes `read` and `write`
/// lock-qualified.
#[derive(Debug, Clone)]
pub struct WorldState {
    field_size: i32,
    agents:     Vec<AgentState>,
}

impl WorldState {
    pub(crate) fn new(field_size: i32, agents: Vec<AgentState>) -> Self {
        Self { field_size, agents }
    }

    #[inline]
    pub fn field_size(&self) -> i32 {
        self.field_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Copy of one agent's row.
    pub fn read(&self, id: AgentId) -> WorldResult<AgentState> {
        self.agents
            .get(id.index())
            .copied()
            .ok_or(WorldError::AgentNotFound(id))
    }

    /// Replace one agent's row.
    ///
    /// Rejects rows that would break the table's invariants: the row must
    /// carry the slot's id, stay on the field, never re-activate, and only
    /// deactivate while standing on its target.
    pub fn write(&mut self, id: AgentId, state: AgentState) -> WorldResult<()> {
        let field_size = self.field_size;
        let slot = self
            .agents
            .get_mut(id.index())
            .ok_or(WorldError::AgentNotFound(id))?;

        if state.id != id {
            return Err(WorldError::IdMismatch { slot: id, found: state.id });
        }
        if !state.position.in_bounds(field_size) {
            return Err(WorldError::OutOfBounds { agent: id, pos: state.position });
        }
        if state.active && !slot.active {
            return Err(WorldError::Reactivated(id));
        }
        if !state.active && !state.at_target() {
            return Err(WorldError::DeactivatedOffTarget {
                agent:  id,
                pos:    state.position,
                target: state.target,
            });
        }

        *slot = state;
        Ok(())
    }

    /// Copy of every row in ascending id order.
    pub fn snapshot(&self) -> Vec<AgentState> {
        self.agents.clone()
    }

    /// Positions of active agents other than `me`.
    pub fn active_others(&self, me: AgentId) -> Vec<AgentState> {
        self.agents
            .iter()
            .filter(|a| a.active && a.id != me)
            .copied()
            .collect()
    }

    /// Number of agents that have not yet arrived.
    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| a.active).count()
    }

    #[inline]
    pub fn all_inactive(&self) -> bool {
        self.agents.iter().all(|a| !a.active)
    }
}
