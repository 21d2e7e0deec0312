//! `gw-avoid` — per-step collision avoidance.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`decision`]  | `Decision`, `Route`, `BlockReason`                             |
//! | [`policy`]    | `AvoidancePolicy` trait                                        |
//! | [`greedy`]    | `GreedySidestep`: direct step, id priority, 4-way sidestep     |
//! | [`straight`]  | `StraightLine`: direct step, never blocks                      |
//!
//! # Design notes
//!
//! A policy is a pure function of one agent's row and a snapshot of the
//! others.  The controller in `gw-sim` calls it while holding the gate and
//! commits the result before releasing, so the snapshot is never stale at
//! decision time.  Policies never sleep; a `Blocked` decision carries the
//! reason and the controller picks the matching pause after releasing the
//! gate.

pub mod decision;
pub mod greedy;
pub mod policy;
pub mod straight;


pub use decision::{BlockReason, Decision, Route};
pub use greedy::GreedySidestep;
pub use policy::AvoidancePolicy;
pub use straight::StraightLine;
