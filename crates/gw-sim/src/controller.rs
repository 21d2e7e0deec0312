//! The per-agent control loop.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, trace};

use gw_avoid::{AvoidancePolicy, BlockReason, Decision, Route};
use gw_core::{AgentId, AgentRng, GridPos};
use gw_world::Gate;

use crate::{AgentReport, Pacing, Renderer, SimResult};

/// Result of one pass through the controller loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A move was committed.
    Moved { to: GridPos, route: Route },
    /// A lower-id agent was in the way.
    Yielded { to: AgentId },
    /// Neither the direct step nor any sidestep was safe.
    Gridlocked,
    /// The agent is on its target and now inactive.  Terminal.
    Arrived,
}

/// Drives one agent from its start to its target.
///
/// The controller owns no world state.  Every step re-reads its own row under
/// the gate, so nothing it knows survives a sleep.
///
/// ```text
/// Running ──Moved/Yielded/Gridlocked──▶ Running
///    │
///    └──────────Arrived──────────────▶ Arrived (terminal)
/// ```
pub struct AgentController<P: AvoidancePolicy> {
    id:       AgentId,
    gate:     Arc<Gate>,
    policy:   Arc<P>,
    renderer: Arc<dyn Renderer>,
    pacing:   Pacing,
    rng:      AgentRng,
    /// Last speed read from the agent's row; scales the post-move pause.
    speed:    u32,
    report:   AgentReport,
}

impl<P: AvoidancePolicy> AgentController<P> {
    /// Create a controller for `id`.
    ///
    /// Fails if `id` has no row in the world table.
    pub fn new(
        id:       AgentId,
        gate:     Arc<Gate>,
        policy:   Arc<P>,
        renderer: Arc<dyn Renderer>,
        pacing:   Pacing,
        rng:      AgentRng,
    ) -> SimResult<Self> {
        let row = gate.acquire()?.read(id)?;
        let mut report = AgentReport::new(id, row.position);
        report.arrived = !row.active;
        Ok(Self {
            id,
            gate,
            policy,
            renderer,
            pacing,
            rng,
            speed: row.speed,
            report,
        })
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn is_arrived(&self) -> bool {
        self.report.arrived
    }

    pub fn report(&self) -> &AgentReport {
        &self.report
    }

    pub fn into_report(self) -> AgentReport {
        self.report
    }

    /// Run one read-decide-write pass.  Never sleeps.
    ///
    /// Calling `step` after the agent arrived returns `Arrived` again without
    /// touching the table.
    pub fn step(&mut self) -> SimResult<StepOutcome> {
        let mut guard = self.gate.acquire()?;
        let mut me = guard.read(self.id)?;
        if !me.active {
            return Ok(StepOutcome::Arrived);
        }
        self.speed = me.speed;

        let others = guard.active_others(self.id);
        match self.policy.decide(&me, &others) {
            Decision::Arrived => {
                me.active = false;
                guard.write(self.id, me)?;
                guard.release();

                self.report.arrived = true;
                self.report.final_position = me.position;
                info!(agent = self.id.0, at = %me.position, "reached target");
                self.renderer.on_arrival(&me);
                Ok(StepOutcome::Arrived)
            }

            Decision::Moved { to, route } => {
                let from = me.position;
                me.position = to;
                guard.write(self.id, me)?;
                let snapshot = guard.snapshot();
                guard.release();

                self.report.record_move(to, route);
                match route {
                    Route::Direct => debug!(agent = self.id.0, %from, %to, "moved"),
                    Route::Sidestep(alt) => {
                        debug!(agent = self.id.0, %from, %to, sidestep = %alt, "avoided and moved")
                    }
                }
                self.renderer.show(&snapshot);
                Ok(StepOutcome::Moved { to, route })
            }

            Decision::Blocked(reason) => {
                guard.release();
                match reason {
                    BlockReason::Yield { to } => {
                        self.report.yields += 1;
                        trace!(agent = self.id.0, yield_to = to.0, "yielding");
                        Ok(StepOutcome::Yielded { to })
                    }
                    BlockReason::Gridlock => {
                        self.report.gridlocks += 1;
                        debug!(agent = self.id.0, at = %me.position, "gridlocked");
                        Ok(StepOutcome::Gridlocked)
                    }
                }
            }
        }
    }

    /// How long to sleep after `outcome`.  `None` once arrived.
    pub fn pause_after(&mut self, outcome: StepOutcome) -> Option<Duration> {
        match outcome {
            StepOutcome::Moved { .. } => Some(self.pacing.after_move(self.speed)),
            StepOutcome::Yielded { to } => {
                Some(self.pacing.after_block(BlockReason::Yield { to }, &mut self.rng))
            }
            StepOutcome::Gridlocked => {
                Some(self.pacing.after_block(BlockReason::Gridlock, &mut self.rng))
            }
            StepOutcome::Arrived => None,
        }
    }

    /// Loop until the agent arrives, sleeping between steps.
    pub fn run(mut self) -> SimResult<AgentReport> {
        loop {
            let outcome = self.step()?;
            match self.pause_after(outcome) {
                Some(pause) => {
                    if !pause.is_zero() {
                        thread::sleep(pause);
                    }
                }
                None => return Ok(self.report),
            }
        }
    }
}
