//! Simulation configuration.
//!
//! A `SimConfig` is fixed at start-up and never changes during a run.  It is
//! typically loaded from a TOML file by the application crate (enable the
//! `serde` feature) and handed to `gw_sim::SimBuilder`, which calls
//! [`SimConfig::validate`] before anything is allocated.
//!
//! ```toml
//! field_size    = 30
//! agent_count   = 2
//! safe_distance = 2.0
//! move_delay_ms = 100
//!
//! [[agents]]
//! start  = { x = 0, y = 0 }
//! target = { x = 29, y = 29 }
//! speed  = 1
//! ```

use crate::{AgentId, GridPos, GwError, GwResult};

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// Initial placement of one agent.  The agent's id is its index in
/// [`SimConfig::agents`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub start:  GridPos,
    pub target: GridPos,
    /// Pacing divisor: after each committed move the agent sleeps
    /// `speed * move_delay_ms`.  Must be positive.
    pub speed:  u32,
}

impl AgentSpec {
    pub fn new(start: GridPos, target: GridPos, speed: u32) -> Self {
        Self { start, target, speed }
    }
}

// ── Timing ────────────────────────────────────────────────────────────────────

/// Cooperative pacing constants.  None of these are deadlines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timing {
    /// Lower bound of the randomized backoff after yielding priority.
    pub yield_backoff_min_ms: u64,
    /// Upper bound (inclusive) of the randomized backoff.
    pub yield_backoff_max_ms: u64,
    /// Fixed pause after every direct and fallback step was unsafe.
    pub gridlock_pause_ms:    u64,
    /// How often the supervisor checks whether every agent has arrived.
    pub poll_interval_ms:     u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            yield_backoff_min_ms: 100,
            yield_backoff_max_ms: 500,
            gridlock_pause_ms:    500,
            poll_interval_ms:     100,
        }
    }
}

impl Timing {
    /// All-zero timing: no pacing, no backoff.  Handy for tests that only care
    /// about movement, not about wall-clock behaviour.
    pub fn instant() -> Self {
        Self {
            yield_backoff_min_ms: 0,
            yield_backoff_max_ms: 0,
            gridlock_pause_ms:    0,
            poll_interval_ms:     1,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

fn default_move_delay_ms() -> u64 {
    100
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Side length of the square field.
    pub field_size: i32,

    /// Number of agents.  Must equal `agents.len()`.
    pub agent_count: usize,

    /// Two active agents closer than this (Euclidean) are in conflict.
    pub safe_distance: f64,

    /// Base pacing unit in milliseconds; multiplied by each agent's speed.
    #[cfg_attr(feature = "serde", serde(default = "default_move_delay_ms"))]
    pub move_delay_ms: u64,

    /// Master RNG seed for backoff jitter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,

    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: Timing,

    pub agents: Vec<AgentSpec>,
}

impl SimConfig {
    /// Build a config from a roster, deriving `agent_count` from it.
    pub fn new(field_size: i32, safe_distance: f64, agents: Vec<AgentSpec>) -> Self {
        Self {
            field_size,
            agent_count: agents.len(),
            safe_distance,
            move_delay_ms: default_move_delay_ms(),
            seed: 0,
            timing: Timing::default(),
            agents,
        }
    }

    /// Three agents crossing a 30×30 field corner to corner with safe
    /// distance 2.  Agents 1 and 2 travel the same diagonal head-on while
    /// agent 0 cuts across both.
    pub fn crossing() -> Self {
        const N: i32 = 30;
        Self::new(
            N,
            2.0,
            vec![
                AgentSpec::new(GridPos::new(0, 0),     GridPos::new(N - 1, N - 1), 1),
                AgentSpec::new(GridPos::new(0, N - 1), GridPos::new(N - 1, 0),     1),
                AgentSpec::new(GridPos::new(N - 1, 0), GridPos::new(0, N - 1),     1),
            ],
        )
    }

    /// Iterator over `(AgentId, &AgentSpec)` in ascending id order.
    pub fn specs(&self) -> impl Iterator<Item = (AgentId, &AgentSpec)> + '_ {
        (0..self.agents.len() as u32).map(AgentId).zip(self.agents.iter())
    }

    /// Check every invariant the simulation relies on.
    ///
    /// Called by the simulation builder; a failure here is fatal and no agent
    /// is started.
    pub fn validate(&self) -> GwResult<()> {
        if self.field_size <= 0 {
            return Err(GwError::Config(format!(
                "field_size must be positive, got {}",
                self.field_size
            )));
        }
        if !self.safe_distance.is_finite() || self.safe_distance < 0.0 {
            return Err(GwError::Config(format!(
                "safe_distance must be a finite, non-negative number, got {}",
                self.safe_distance
            )));
        }
        if self.agent_count != self.agents.len() {
            return Err(GwError::AgentCountMismatch {
                declared: self.agent_count,
                listed:   self.agents.len(),
            });
        }
        if u32::try_from(self.agents.len()).is_err() {
            return Err(GwError::Config(format!(
                "{} agents exceed the id space",
                self.agents.len()
            )));
        }
        if self.timing.yield_backoff_min_ms > self.timing.yield_backoff_max_ms {
            return Err(GwError::Config(format!(
                "yield backoff range {}..={} ms is empty",
                self.timing.yield_backoff_min_ms, self.timing.yield_backoff_max_ms
            )));
        }

        for (agent, spec) in self.specs() {
            for (what, pos) in [("start", spec.start), ("target", spec.target)] {
                if !pos.in_bounds(self.field_size) {
                    return Err(GwError::OutOfBounds {
                        agent,
                        what,
                        pos,
                        field_size: self.field_size,
                    });
                }
            }
            if spec.speed == 0 {
                return Err(GwError::ZeroSpeed(agent));
            }
        }
        Ok(())
    }
}
