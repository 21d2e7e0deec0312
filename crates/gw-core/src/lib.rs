//! `gw-core` — foundational types for the `gridwalk` simulator.
//!
//! This crate is a dependency of every other `gw-*` crate.  It has no `gw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`grid`]        | `GridPos`, `Step`, Euclidean / Chebyshev distance     |
//! | [`config`]      | `SimConfig`, `AgentSpec`, `Timing`                    |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `GwError`, `GwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types (TOML input) |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AgentSpec, SimConfig, Timing};
pub use error::{GwError, GwResult};
pub use grid::{GridPos, Step};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
