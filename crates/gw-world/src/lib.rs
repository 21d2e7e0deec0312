//! `gw-world` — the shared world table and the gate that guards it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`state`]     | `AgentState`: one agent's live row                          |
//! | [`world`]     | `WorldState`: the ordered table, `read`/`write`/`snapshot`  |
//! | [`gate`]      | `Gate` + `GateGuard`: the single binary lock                |
//! | [`builder`]   | `WorldBuilder`: table + per-agent RNGs from a `SimConfig`   |
//! | [`roster`]    | CSV roster loader and random scatter                        |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                              |
//!
//! # Access discipline
//!
//! `WorldState` is only reachable through a [`GateGuard`].  Every
//! read-modify-write sequence, including an agent touching its own row, runs
//! between `Gate::acquire` and the guard being dropped.  Nothing here sleeps
//! while holding the guard; callers must not either.

pub mod builder;
pub mod error;
pub mod gate;
pub mod roster;
pub mod state;
pub mod world;


pub use builder::{AgentRngs, WorldBuilder};
pub use error::{WorldError, WorldResult};
pub use gate::{Gate, GateGuard};
pub use roster::{load_roster_csv, load_roster_reader, scatter};
pub use state::AgentState;
pub use world::WorldState;
