//! Fluent builder for constructing a [`Simulation`].

use std::sync::Arc;

use gw_avoid::{AvoidancePolicy, GreedySidestep};
use gw_core::SimConfig;
use gw_world::{Gate, WorldBuilder};

use crate::{NoopRenderer, Pacing, Renderer, SimError, SimResult, Simulation};

/// Fluent builder for [`Simulation<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: field, safe distance, roster, timing
/// - `P: AvoidancePolicy`: the per-step decision rule
///
/// # Optional inputs
///
/// | Method           | Default          |
/// |------------------|------------------|
/// | `.renderer(r)`   | [`NoopRenderer`] |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::greedy(SimConfig::crossing())
///     .renderer(Arc::new(console))
///     .build()?;
/// let report = sim.run()?;
/// ```
pub struct SimBuilder<P: AvoidancePolicy> {
    config:   SimConfig,
    policy:   P,
    renderer: Option<Arc<dyn Renderer>>,
}

impl SimBuilder<GreedySidestep> {
    /// Builder using [`GreedySidestep`] with the config's safe distance and
    /// field size.
    pub fn greedy(config: SimConfig) -> Self {
        let policy = GreedySidestep::from_config(&config);
        Self::new(config, policy)
    }
}

impl<P: AvoidancePolicy> SimBuilder<P> {
    pub fn new(config: SimConfig, policy: P) -> Self {
        Self { config, policy, renderer: None }
    }

    /// Receive a snapshot after every committed move.
    pub fn renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Validate the config, lay out the world table behind a fresh gate, and
    /// return a ready-to-run [`Simulation`].
    ///
    /// Nothing is spawned here; a failure leaves no thread behind.
    pub fn build(self) -> SimResult<Simulation<P>> {
        let (world, rngs) = WorldBuilder::new(&self.config)
            .build()
            .map_err(SimError::Setup)?;

        let pacing = Pacing::from_config(&self.config);
        let renderer = self.renderer.unwrap_or_else(|| Arc::new(NoopRenderer));

        Ok(Simulation {
            config: self.config,
            gate: Arc::new(Gate::new(world)),
            policy: Arc::new(self.policy),
            renderer,
            pacing,
            rngs,
        })
    }
}
