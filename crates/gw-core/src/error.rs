//! Configuration error type.
//!
//! Sub-crates define their own error enums and wrap `GwError` as one variant
//! so a bad config surfaces unchanged all the way up to the binary.

use thiserror::Error;

use crate::{AgentId, GridPos};

/// The top-level error type for `gw-core`.
#[derive(Debug, Error)]
pub enum GwError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("agent_count is {declared} but {listed} agents are listed")]
    AgentCountMismatch { declared: usize, listed: usize },

    #[error("{agent} {what} {pos} lies outside the {field_size}x{field_size} field")]
    OutOfBounds {
        agent:      AgentId,
        what:       &'static str,
        pos:        GridPos,
        field_size: i32,
    },

    #[error("{0} has speed 0; speed must be a positive pacing divisor")]
    ZeroSpeed(AgentId),
}

/// Shorthand result type for `gw-core`.
pub type GwResult<T> = Result<T, GwError>;
