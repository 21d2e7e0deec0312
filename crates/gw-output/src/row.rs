//! Plain data row written by trace backends.

use gw_world::AgentState;

/// One agent's row in one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRow {
    /// Frame counter, starting at 0 for the first snapshot shown.
    pub frame:    u64,
    pub agent_id: u32,
    pub x:        i32,
    pub y:        i32,
    pub target_x: i32,
    pub target_y: i32,
    pub active:   bool,
}

impl TraceRow {
    pub fn from_state(frame: u64, agent: &AgentState) -> Self {
        Self {
            frame,
            agent_id: agent.id.0,
            x:        agent.position.x,
            y:        agent.position.y,
            target_x: agent.target.x,
            target_y: agent.target.y,
            active:   agent.active,
        }
    }
}
