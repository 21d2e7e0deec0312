//! Build the world table and per-agent RNGs from a `SimConfig`.
//!
//! # Usage
//!
//! ```rust
//! use gw_core::SimConfig;
//! use gw_world::{Gate, WorldBuilder};
//!
//! let (world, rngs) = WorldBuilder::new(&SimConfig::crossing()).build().unwrap();
//! assert_eq!(world.len(), 3);
//! assert_eq!(rngs.len(), 3);
//!
//! let gate = Gate::new(world);
//! assert_eq!(gate.acquire().unwrap().active_count(), 3);
//! ```

use gw_core::{AgentId, AgentRng, SimConfig};

use crate::{AgentState, WorldResult, WorldState};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent backoff RNGs, one per row of the world table.
///
/// Kept outside [`WorldState`] because each RNG moves into its agent's
/// controller thread and is never touched under the gate.
#[derive(Debug)]
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl IntoIterator for AgentRngs {
    type Item = AgentRng;
    type IntoIter = std::vec::IntoIter<AgentRng>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

/// Builds [`WorldState`] + [`AgentRngs`] in one step.
pub struct WorldBuilder<'a> {
    config: &'a SimConfig,
}

impl<'a> WorldBuilder<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    /// Validate the config, then lay out one active row per agent spec.
    ///
    /// Any validation failure is returned before anything is allocated.
    pub fn build(self) -> WorldResult<(WorldState, AgentRngs)> {
        self.config.validate()?;

        let rows = self
            .config
            .specs()
            .map(|(id, spec)| AgentState::new(id, spec))
            .collect();

        let world = WorldState::new(self.config.field_size, rows);
        let rngs = AgentRngs::new(self.config.agents.len(), self.config.seed);
        Ok((world, rngs))
    }
}
