//! Waits for every agent to arrive, then joins the controller threads.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use gw_core::AgentId;
use gw_world::Gate;

use crate::{AgentReport, SimError, SimResult};

type ControllerHandle = JoinHandle<SimResult<AgentReport>>;

/// Polls the world table until no agent is active.
///
/// The supervisor takes the gate only long enough to copy the table, so it
/// never holds up a controller for more than one snapshot.  It also watches
/// for controllers that finish while their agent is still active; such a run
/// can never terminate, so the failure is surfaced instead of polling
/// forever.
pub struct TerminationSupervisor {
    gate:          Arc<Gate>,
    poll_interval: Duration,
    agents:        Vec<(AgentId, ControllerHandle)>,
}

impl TerminationSupervisor {
    pub fn new(gate: Arc<Gate>, poll_interval: Duration) -> Self {
        Self { gate, poll_interval, agents: Vec::new() }
    }

    /// Track the controller thread driving `id`.
    pub fn watch(&mut self, id: AgentId, handle: ControllerHandle) {
        self.agents.push((id, handle));
    }

    /// Block until every row is inactive, then join all controllers.
    ///
    /// Returns one report per watched agent, ascending id.
    pub fn wait(mut self) -> SimResult<Vec<AgentReport>> {
        let mut polls = 0u64;
        loop {
            // Finished handles are collected before the snapshot: a thread
            // that completes in between is then judged on a table that
            // already shows its arrival.
            let finished: Vec<AgentId> = self
                .agents
                .iter()
                .filter(|(_, h)| h.is_finished())
                .map(|(id, _)| *id)
                .collect();

            let snapshot = match self.gate.acquire().map(|guard| guard.snapshot()) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    // A controller that panicked under the gate poisons it;
                    // report the panic rather than the poisoning.
                    for id in finished {
                        if let Err(panicked @ SimError::AgentPanicked(_)) = self.reap_early(id) {
                            return Err(panicked);
                        }
                    }
                    return Err(err.into());
                }
            };
            polls += 1;

            if snapshot.iter().all(|a| !a.active) {
                break;
            }

            for id in finished {
                let still_active = snapshot.iter().any(|a| a.id == id && a.active);
                if still_active {
                    self.reap_early(id)?;
                }
            }

            thread::sleep(self.poll_interval);
        }

        info!(agents = self.agents.len(), polls, "all agents reached their targets");

        let mut reports = Vec::with_capacity(self.agents.len());
        for (id, handle) in self.agents {
            match handle.join() {
                Ok(result) => reports.push(result?),
                Err(_) => {
                    warn!(agent = id.0, "controller panicked after arrival");
                    return Err(SimError::AgentPanicked(id));
                }
            }
        }
        reports.sort_by_key(|r| r.id);
        Ok(reports)
    }

    /// Join a controller whose agent never arrived and turn its end into an
    /// error.
    fn reap_early(&mut self, id: AgentId) -> SimResult<()> {
        let Some(idx) = self.agents.iter().position(|(a, _)| *a == id) else {
            return Ok(());
        };
        let (_, handle) = self.agents.swap_remove(idx);
        match handle.join() {
            Err(_) => {
                warn!(agent = id.0, "controller panicked before arrival");
                Err(SimError::AgentPanicked(id))
            }
            Ok(Err(err)) => {
                warn!(agent = id.0, error = %err, "controller failed before arrival");
                Err(err)
            }
            Ok(Ok(_)) => {
                warn!(agent = id.0, "controller exited before arrival");
                Err(SimError::AgentExited(id))
            }
        }
    }
}
