use gw_core::{AgentId, GridPos, GwError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("row for {found} written to slot {slot}")]
    IdMismatch { slot: AgentId, found: AgentId },

    #[error("{agent} would leave the field at {pos}")]
    OutOfBounds { agent: AgentId, pos: GridPos },

    #[error("{0} is inactive and cannot become active again")]
    Reactivated(AgentId),

    #[error("{agent} cannot finish at {pos}; its target is {target}")]
    DeactivatedOffTarget {
        agent:  AgentId,
        pos:    GridPos,
        target: GridPos,
    },

    #[error("world gate poisoned: an agent panicked while holding it")]
    GatePoisoned,

    #[error("roster parse error: {0}")]
    Roster(String),

    #[error(transparent)]
    Config(#[from] GwError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
