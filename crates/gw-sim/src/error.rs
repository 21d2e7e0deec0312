use gw_core::AgentId;
use gw_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// The world table or gate could not be set up; no agent was started.
    #[error("simulation setup failed: {0}")]
    Setup(#[source] WorldError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("failed to spawn controller thread for {agent}: {source}")]
    Spawn {
        agent:  AgentId,
        #[source]
        source: std::io::Error,
    },

    #[error("controller for {0} panicked")]
    AgentPanicked(AgentId),

    #[error("controller for {0} exited before its agent arrived")]
    AgentExited(AgentId),

    #[error("{remaining} agents still active after {rounds} lockstep rounds")]
    RoundLimit { rounds: u64, remaining: usize },
}

pub type SimResult<T> = Result<T, SimError>;
