//! Unit tests for gw-sim.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use gw_avoid::{GreedySidestep, Route, StraightLine};
use gw_core::{AgentId, AgentRng, AgentSpec, GridPos, SimConfig, Timing};
use gw_world::{AgentState, Gate, WorldBuilder};

use crate::{
    AgentController, AgentReport, NoopRenderer, Pacing, Renderer, SimBuilder, SimError,
    SimResult, StepOutcome, TerminationSupervisor,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Collects everything the simulation hands to its renderer.
#[derive(Default)]
struct RecordingRenderer {
    frames:   Mutex<Vec<Vec<AgentState>>>,
    arrivals: Mutex<Vec<AgentId>>,
    finished: Mutex<Option<Vec<AgentState>>>,
}

impl Renderer for RecordingRenderer {
    fn show(&self, snapshot: &[AgentState]) {
        self.frames.lock().unwrap().push(snapshot.to_vec());
    }

    fn on_arrival(&self, agent: &AgentState) {
        self.arrivals.lock().unwrap().push(agent.id);
    }

    fn on_finish(&self, final_state: &[AgentState]) {
        *self.finished.lock().unwrap() = Some(final_state.to_vec());
    }
}

fn spec(start: (i32, i32), target: (i32, i32)) -> AgentSpec {
    AgentSpec::new(GridPos::new(start.0, start.1), GridPos::new(target.0, target.1), 1)
}

/// 10×10 field, safe distance 2, no pacing.
fn instant_config(agents: Vec<AgentSpec>) -> SimConfig {
    let mut cfg = SimConfig::new(10, 2.0, agents);
    cfg.move_delay_ms = 0;
    cfg.timing = Timing::instant();
    cfg
}

/// Crossing scenario with millisecond pacing, for threaded runs.
fn fast_crossing() -> SimConfig {
    let mut cfg = SimConfig::crossing();
    cfg.move_delay_ms = 1;
    cfg.seed = 7;
    cfg.timing = Timing {
        yield_backoff_min_ms: 1,
        yield_backoff_max_ms: 3,
        gridlock_pause_ms:    3,
        poll_interval_ms:     1,
    };
    cfg
}

fn gate_for(cfg: &SimConfig) -> Arc<Gate> {
    let (world, _) = WorldBuilder::new(cfg).build().unwrap();
    Arc::new(Gate::new(world))
}

fn controller<P: gw_avoid::AvoidancePolicy>(
    id:     u32,
    gate:   &Arc<Gate>,
    policy: P,
    cfg:    &SimConfig,
) -> AgentController<P> {
    AgentController::new(
        AgentId(id),
        Arc::clone(gate),
        Arc::new(policy),
        Arc::new(NoopRenderer),
        Pacing::from_config(cfg),
        AgentRng::new(cfg.seed, AgentId(id)),
    )
    .unwrap()
}

/// Every frame keeps active agents on the field and at least `safe` apart.
fn assert_frames_safe(frames: &[Vec<AgentState>], field_size: i32, safe: f64) {
    for (n, frame) in frames.iter().enumerate() {
        for a in frame {
            assert!(a.position.in_bounds(field_size), "frame {n}: {} off field", a.id);
        }
        let active: Vec<&AgentState> = frame.iter().filter(|a| a.active).collect();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                let d = a.position.euclidean(b.position);
                assert!(d >= safe, "frame {n}: {} and {} only {d} apart", a.id, b.id);
            }
        }
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn invalid_config_is_setup_error() {
        let mut cfg = SimConfig::crossing();
        cfg.agent_count = 5;
        assert!(matches!(SimBuilder::greedy(cfg).build(), Err(SimError::Setup(_))));
    }

    #[test]
    fn out_of_bounds_start_is_setup_error() {
        let cfg = instant_config(vec![spec((10, 0), (0, 0))]);
        assert!(matches!(SimBuilder::greedy(cfg).build(), Err(SimError::Setup(_))));
    }

    #[test]
    fn builds_one_row_per_agent() {
        let sim = SimBuilder::greedy(SimConfig::crossing()).build().unwrap();
        assert_eq!(sim.gate().acquire().unwrap().len(), 3);
    }
}

// ── AgentController ───────────────────────────────────────────────────────────

#[cfg(test)]
mod controller {
    use super::*;

    #[test]
    fn walks_diagonal_then_arrives() {
        let cfg = instant_config(vec![spec((0, 0), (3, 3))]);
        let gate = gate_for(&cfg);
        let mut c = controller(0, &gate, StraightLine, &cfg);

        for i in 1..=3 {
            assert_eq!(
                c.step().unwrap(),
                StepOutcome::Moved { to: GridPos::new(i, i), route: Route::Direct }
            );
        }
        assert!(!c.is_arrived());
        assert_eq!(c.step().unwrap(), StepOutcome::Arrived);
        assert!(c.is_arrived());

        let row = gate.acquire().unwrap().read(AgentId(0)).unwrap();
        assert_eq!(row.position, GridPos::new(3, 3));
        assert!(!row.active);

        let report = c.report();
        assert_eq!(report.moves, 3);
        assert_eq!(report.steps(), 4);
        assert_eq!(report.final_position, GridPos::new(3, 3));
    }

    #[test]
    fn step_after_arrival_is_idempotent() {
        let cfg = instant_config(vec![spec((2, 2), (2, 2))]);
        let gate = gate_for(&cfg);
        let mut c = controller(0, &gate, StraightLine, &cfg);

        assert_eq!(c.step().unwrap(), StepOutcome::Arrived);
        let before = gate.acquisitions();
        assert_eq!(c.step().unwrap(), StepOutcome::Arrived);
        assert_eq!(gate.acquisitions(), before + 1);
        assert_eq!(c.report().steps(), 1);
    }

    #[test]
    fn yields_to_lower_id_then_proceeds() {
        let cfg = instant_config(vec![spec((5, 5), (5, 5)), spec((3, 5), (9, 5))]);
        let gate = gate_for(&cfg);
        let policy = GreedySidestep::from_config(&cfg);
        let mut parked = controller(0, &gate, policy, &cfg);
        let mut mover = controller(1, &gate, policy, &cfg);

        assert_eq!(mover.step().unwrap(), StepOutcome::Yielded { to: AgentId(0) });
        assert_eq!(parked.step().unwrap(), StepOutcome::Arrived);
        assert_eq!(
            mover.step().unwrap(),
            StepOutcome::Moved { to: GridPos::new(4, 5), route: Route::Direct }
        );
        assert_eq!(mover.report().yields, 1);
    }

    #[test]
    fn boxed_in_agent_gridlocks_and_stays_put() {
        let cfg = instant_config(vec![
            spec((5, 5), (9, 5)),
            spec((7, 5), (7, 5)),
            spec((3, 5), (3, 5)),
        ]);
        let gate = gate_for(&cfg);
        let mut c = controller(0, &gate, GreedySidestep::from_config(&cfg), &cfg);

        assert_eq!(c.step().unwrap(), StepOutcome::Gridlocked);
        assert_eq!(c.report().gridlocks, 1);
        let row = gate.acquire().unwrap().read(AgentId(0)).unwrap();
        assert_eq!(row.position, GridPos::new(5, 5));
        assert!(row.active);
    }

    #[test]
    fn sidestep_counts_as_detour() {
        // Agent 1 parked on the diagonal; agent 0 has priority and goes around.
        let cfg = instant_config(vec![spec((0, 0), (4, 4)), spec((2, 2), (2, 2))]);
        let gate = gate_for(&cfg);
        let mut c = controller(0, &gate, GreedySidestep::from_config(&cfg), &cfg);

        match c.step().unwrap() {
            StepOutcome::Moved { route: Route::Sidestep(_), .. } => {}
            other => panic!("expected a sidestep, got {other:?}"),
        }
        assert_eq!(c.report().detours, 1);
    }

    #[test]
    fn pause_follows_outcome() {
        let mut cfg = instant_config(vec![spec((0, 0), (1, 1))]);
        cfg.agents[0].speed = 3;
        cfg.move_delay_ms = 10;
        cfg.timing.gridlock_pause_ms = 7;
        let gate = gate_for(&cfg);
        let mut c = controller(0, &gate, StraightLine, &cfg);

        let moved = c.step().unwrap();
        assert_eq!(c.pause_after(moved), Some(Duration::from_millis(30)));
        assert_eq!(c.pause_after(StepOutcome::Gridlocked), Some(Duration::from_millis(7)));
        assert_eq!(c.pause_after(StepOutcome::Arrived), None);
    }

    #[test]
    fn unknown_agent_fails_to_build() {
        let cfg = instant_config(vec![spec((0, 0), (1, 1))]);
        let gate = gate_for(&cfg);
        let result = AgentController::new(
            AgentId(4),
            gate,
            Arc::new(StraightLine),
            Arc::new(NoopRenderer),
            Pacing::from_config(&cfg),
            AgentRng::new(0, AgentId(4)),
        );
        assert!(matches!(result, Err(SimError::World(_))));
    }
}

// ── Pacing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pacing {
    use super::*;
    use gw_avoid::BlockReason;

    #[test]
    fn move_pause_scales_with_speed() {
        let p = Pacing::from_config(&SimConfig::crossing());
        assert_eq!(p.after_move(1), Duration::from_millis(100));
        assert_eq!(p.after_move(4), Duration::from_millis(400));
    }

    #[test]
    fn yield_backoff_stays_in_range() {
        let p = Pacing::from_config(&SimConfig::crossing());
        let mut rng = AgentRng::new(3, AgentId(0));
        for _ in 0..500 {
            let d = p.after_block(BlockReason::Yield { to: AgentId(1) }, &mut rng);
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(500));
        }
    }

    #[test]
    fn gridlock_pause_is_fixed() {
        let p = Pacing::from_config(&SimConfig::crossing());
        let mut rng = AgentRng::new(3, AgentId(0));
        assert_eq!(p.after_block(BlockReason::Gridlock, &mut rng), Duration::from_millis(500));
        assert_eq!(p.poll_interval(), Duration::from_millis(100));
    }
}

// ── TerminationSupervisor ─────────────────────────────────────────────────────

#[cfg(test)]
mod supervisor {
    use super::*;

    fn one_agent_gate() -> Arc<Gate> {
        gate_for(&instant_config(vec![spec((0, 0), (5, 5))]))
    }

    #[test]
    fn controller_exiting_early_is_reported() {
        let gate = one_agent_gate();
        let mut sup = TerminationSupervisor::new(Arc::clone(&gate), Duration::from_millis(1));
        sup.watch(
            AgentId(0),
            thread::spawn(|| -> SimResult<AgentReport> {
                Ok(AgentReport::new(AgentId(0), GridPos::new(0, 0)))
            }),
        );
        assert!(matches!(sup.wait(), Err(SimError::AgentExited(AgentId(0)))));
    }

    #[test]
    fn controller_panic_is_reported() {
        let gate = one_agent_gate();
        let mut sup = TerminationSupervisor::new(Arc::clone(&gate), Duration::from_millis(1));
        sup.watch(
            AgentId(0),
            thread::spawn(|| -> SimResult<AgentReport> { panic!("controller blew up") }),
        );
        assert!(matches!(sup.wait(), Err(SimError::AgentPanicked(AgentId(0)))));
    }

    #[test]
    fn controller_error_is_propagated() {
        let gate = one_agent_gate();
        let mut sup = TerminationSupervisor::new(Arc::clone(&gate), Duration::from_millis(1));
        sup.watch(
            AgentId(0),
            thread::spawn(|| -> SimResult<AgentReport> { Err(SimError::AgentExited(AgentId(9))) }),
        );
        assert!(matches!(sup.wait(), Err(SimError::AgentExited(AgentId(9)))));
    }

    #[test]
    fn returns_once_rows_go_inactive() {
        let gate = one_agent_gate();
        let mut sup = TerminationSupervisor::new(Arc::clone(&gate), Duration::from_millis(1));

        let worker_gate = Arc::clone(&gate);
        sup.watch(
            AgentId(0),
            thread::spawn(move || -> SimResult<AgentReport> {
                thread::sleep(Duration::from_millis(20));
                let mut guard = worker_gate.acquire()?;
                let mut row = guard.read(AgentId(0))?;
                row.position = row.target;
                row.active = false;
                guard.write(AgentId(0), row)?;
                let mut report = AgentReport::new(AgentId(0), row.position);
                report.arrived = true;
                Ok(report)
            }),
        );

        let reports = sup.wait().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].arrived);
        assert!(gate.acquire().unwrap().all_inactive());
    }

    #[test]
    fn empty_roster_finishes_immediately() {
        let report = SimBuilder::greedy(instant_config(Vec::new())).build().unwrap().run().unwrap();
        assert!(report.agents.is_empty());
        assert!(report.all_arrived());
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod simulation {
    use super::*;

    fn lockstep_crossing(rec: &Arc<RecordingRenderer>) -> crate::SimReport {
        let mut cfg = SimConfig::crossing();
        cfg.timing = Timing::instant();
        SimBuilder::greedy(cfg)
            .renderer(rec.clone())
            .build()
            .unwrap()
            .run_lockstep(500)
            .unwrap()
    }

    #[test]
    fn crossing_lockstep_all_arrive_safely() {
        let rec = Arc::new(RecordingRenderer::default());
        let report = lockstep_crossing(&rec);

        assert!(report.all_arrived());
        let cfg = SimConfig::crossing();
        for (state, spec) in report.final_state.iter().zip(&cfg.agents) {
            assert_eq!(state.position, spec.target);
            assert!(!state.active);
        }
        for (agent, spec) in report.agents.iter().zip(&cfg.agents) {
            assert_eq!(agent.final_position, spec.target);
        }
        assert!(report.total_steps() <= 300, "took {} steps", report.total_steps());

        let frames = rec.frames.lock().unwrap();
        // Initial frame plus one per committed move.
        assert_eq!(frames.len() as u64, report.total_moves() + 1);
        assert_frames_safe(&frames, 30, 2.0);

        let mut arrivals = rec.arrivals.lock().unwrap().clone();
        arrivals.sort();
        assert_eq!(arrivals, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(rec.finished.lock().unwrap().as_deref(), Some(&report.final_state[..]));
    }

    #[test]
    fn lockstep_counts_every_acquisition() {
        let rec = Arc::new(RecordingRenderer::default());
        let report = lockstep_crossing(&rec);
        // One per step, one per controller set-up, one for the initial frame.
        assert_eq!(report.gate_acquisitions, report.total_steps() + 3 + 1);
    }

    #[test]
    fn lockstep_is_deterministic() {
        let a = lockstep_crossing(&Arc::new(RecordingRenderer::default()));
        let b = lockstep_crossing(&Arc::new(RecordingRenderer::default()));
        assert_eq!(a.agents, b.agents);
        assert_eq!(a.final_state, b.final_state);
    }

    #[test]
    fn lockstep_round_limit() {
        let mut cfg = SimConfig::crossing();
        cfg.timing = Timing::instant();
        let err = SimBuilder::greedy(cfg).build().unwrap().run_lockstep(3).unwrap_err();
        assert!(matches!(err, SimError::RoundLimit { rounds: 3, remaining: 3 }));
    }

    #[test]
    fn reports_sorted_by_id() {
        let report = lockstep_crossing(&Arc::new(RecordingRenderer::default()));
        let ids: Vec<AgentId> = report.agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn crossing_threaded_all_arrive_safely() {
        let rec = Arc::new(RecordingRenderer::default());
        let report = SimBuilder::greedy(fast_crossing())
            .renderer(rec.clone())
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert!(report.all_arrived());
        let cfg = SimConfig::crossing();
        for (state, spec) in report.final_state.iter().zip(&cfg.agents) {
            assert_eq!(state.position, spec.target);
        }
        assert!(report.gate_acquisitions >= report.total_steps());

        let frames = rec.frames.lock().unwrap();
        assert_frames_safe(&frames, 30, 2.0);
        assert_eq!(rec.arrivals.lock().unwrap().len(), 3);
        assert!(rec.finished.lock().unwrap().is_some());
    }

    #[test]
    fn single_agent_threaded_run() {
        let report = SimBuilder::greedy(instant_config(vec![spec((9, 0), (0, 9))]))
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert!(report.all_arrived());
        assert_eq!(report.agents[0].moves, 9);
        assert_eq!(report.final_state[0].position, GridPos::new(0, 9));
    }
}
