//! `gw-sim` — agent controllers, termination supervisor, and run loop.
//!
//! # Concurrency model
//!
//! ```text
//! one thread per agent:
//!   loop:
//!     ① acquire the gate
//!     ② read own row + active others, ask the AvoidancePolicy
//!     ③ Arrived  → mark inactive, release, stop
//!        Moved    → write new position, copy snapshot, release,
//!                   Renderer::show(snapshot), sleep speed × move_delay
//!        Blocked  → release, sleep (random backoff on Yield,
//!                   fixed pause on Gridlock)
//!
//! supervisor (calling thread):
//!   poll every poll_interval until no row is active, then join all agents
//! ```
//!
//! The gate is held only for ② and the commit in ③; no thread ever sleeps,
//! logs, or renders while holding it.
//!
//! `Simulation::run_lockstep` drives the same controllers on the calling
//! thread in ascending id order without sleeping, which gives reproducible
//! runs for tests and replay.
//!
//! # Known limitation
//!
//! Gate acquisition has no timeout and there is no cancellation beyond an
//! agent arriving.  A controller that dies mid-run is reported as
//! [`SimError::AgentPanicked`] or [`SimError::AgentExited`], but the other
//! agents' threads are left running; the caller is expected to exit.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gw_core::SimConfig;
//! use gw_sim::SimBuilder;
//!
//! let report = SimBuilder::greedy(SimConfig::crossing()).build()?.run()?;
//! assert!(report.all_arrived());
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod pacing;
pub mod render;
pub mod report;
pub mod sim;
pub mod supervisor;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use controller::{AgentController, StepOutcome};
pub use error::{SimError, SimResult};
pub use pacing::Pacing;
pub use render::{NoopRenderer, Renderer};
pub use report::{AgentReport, SimReport};
pub use sim::Simulation;
pub use supervisor::TerminationSupervisor;
