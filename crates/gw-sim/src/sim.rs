//! The `Simulation` struct: threaded and lockstep run loops.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::{debug, info, info_span};

use gw_avoid::AvoidancePolicy;
use gw_core::{AgentId, SimConfig};
use gw_world::{AgentRngs, AgentState, Gate};

use crate::{
    AgentController, AgentReport, Pacing, Renderer, SimError, SimReport, SimResult,
    TerminationSupervisor,
};

// ── Simulation ────────────────────────────────────────────────────────────────

/// A fully set-up run: world table behind its gate, one RNG per agent, the
/// avoidance policy and the renderer.
///
/// Both run methods consume the simulation; a world table is driven to
/// completion exactly once.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation<P: AvoidancePolicy> {
    /// The validated configuration this run was built from.
    pub config: SimConfig,

    pub(crate) gate:     Arc<Gate>,
    pub(crate) policy:   Arc<P>,
    pub(crate) renderer: Arc<dyn Renderer>,
    pub(crate) pacing:   Pacing,
    pub(crate) rngs:     AgentRngs,
}

impl<P: AvoidancePolicy> Simulation<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// The shared gate.  Holding a guard from here stalls every controller.
    pub fn gate(&self) -> &Arc<Gate> {
        &self.gate
    }

    /// Spawn one controller thread per agent and block until all arrive.
    ///
    /// Each thread is named `agent-<id>`.  A spawn failure aborts the run
    /// with [`SimError::Spawn`]; threads spawned before it keep running.
    pub fn run(mut self) -> SimResult<SimReport> {
        let started = Instant::now();
        self.show_initial()?;

        let controllers = self.controllers()?;
        info!(agents = controllers.len(), "starting controller threads");

        let mut supervisor = TerminationSupervisor::new(
            Arc::clone(&self.gate),
            self.pacing.poll_interval(),
        );
        for controller in controllers {
            let id = controller.id();
            let handle = thread::Builder::new()
                .name(format!("agent-{}", id.0))
                .spawn(move || {
                    let _span = info_span!("agent", id = id.0).entered();
                    controller.run()
                })
                .map_err(|source| SimError::Spawn { agent: id, source })?;
            supervisor.watch(id, handle);
        }

        let reports = supervisor.wait()?;
        self.finish(reports, started)
    }

    /// Drive every controller on the calling thread, one `step` each per
    /// round in ascending id order, without sleeping.
    ///
    /// The result depends only on the config, never on the OS scheduler.
    /// Returns [`SimError::RoundLimit`] if any agent is still active after
    /// `max_rounds` rounds.
    pub fn run_lockstep(mut self, max_rounds: u64) -> SimResult<SimReport> {
        let started = Instant::now();
        self.show_initial()?;

        let mut controllers = self.controllers()?;
        let mut rounds = 0u64;
        while controllers.iter().any(|c| !c.is_arrived()) {
            if rounds == max_rounds {
                let remaining = controllers.iter().filter(|c| !c.is_arrived()).count();
                return Err(SimError::RoundLimit { rounds, remaining });
            }
            for controller in controllers.iter_mut().filter(|c| !c.is_arrived()) {
                controller.step()?;
            }
            rounds += 1;
        }
        debug!(rounds, "lockstep run complete");

        let reports = controllers.into_iter().map(AgentController::into_report).collect();
        self.finish(reports, started)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn show_initial(&self) -> SimResult<()> {
        let snapshot = self.gate.acquire()?.snapshot();
        self.renderer.show(&snapshot);
        Ok(())
    }

    /// One controller per row, ascending id.  Moves the RNGs out.
    fn controllers(&mut self) -> SimResult<Vec<AgentController<P>>> {
        let rngs = std::mem::take(&mut self.rngs.inner);
        rngs.into_iter()
            .enumerate()
            .map(|(i, rng)| {
                AgentController::new(
                    AgentId(i as u32),
                    Arc::clone(&self.gate),
                    Arc::clone(&self.policy),
                    Arc::clone(&self.renderer),
                    self.pacing,
                    rng,
                )
            })
            .collect()
    }

    fn finish(self, agents: Vec<AgentReport>, started: Instant) -> SimResult<SimReport> {
        let gate_acquisitions = self.gate.acquisitions();
        let final_state: Vec<AgentState> = match Arc::try_unwrap(self.gate) {
            Ok(gate) => gate.into_inner()?.snapshot(),
            Err(shared) => {
                let guard = shared.acquire()?;
                guard.snapshot()
            }
        };
        self.renderer.on_finish(&final_state);

        let report = SimReport {
            agents,
            final_state,
            gate_acquisitions,
            elapsed: started.elapsed(),
        };
        info!(
            moves = report.total_moves(),
            steps = report.total_steps(),
            gate_acquisitions,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "simulation finished"
        );
        Ok(report)
    }
}
