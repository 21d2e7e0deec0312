//! The mutual-exclusion gate guarding [`WorldState`].
//!
//! There is exactly one `Gate` per simulation, shared by reference
//! (`Arc<Gate>`) between every agent controller and the supervisor.  It is a
//! plain binary lock over the whole table: at most one agent computes and
//! commits a move at any instant.
//!
//! # Contract
//!
//! - [`Gate::acquire`] blocks until the caller is the sole holder.
//! - Dropping (or [`GateGuard::release`]-ing) the guard frees the gate and
//!   wakes one waiter.  There is no fairness among waiters; an unlucky agent
//!   can lose the race repeatedly.  Collision priority is resolved by id in
//!   `gw-avoid`, not by acquisition order.
//! - Not reentrant.  Calling `acquire` while already holding a guard on the
//!   same thread deadlocks.
//! - If a holder panics the gate is poisoned and every later `acquire`
//!   returns [`WorldError::GatePoisoned`].

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::{WorldError, WorldResult, WorldState};

/// Single binary lock owning the world table.
#[derive(Debug)]
pub struct Gate {
    world:        Mutex<WorldState>,
    acquisitions: AtomicU64,
}

impl Gate {
    pub fn new(world: WorldState) -> Self {
        Self {
            world:        Mutex::new(world),
            acquisitions: AtomicU64::new(0),
        }
    }

    /// Block until the gate is free, then hold it.
    pub fn acquire(&self) -> WorldResult<GateGuard<'_>> {
        let inner = self.world.lock().map_err(|_| WorldError::GatePoisoned)?;
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
        Ok(GateGuard { inner })
    }

    /// Total successful acquisitions so far.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions.load(Ordering::Relaxed)
    }

    /// Tear the gate down and hand back the final table.
    pub fn into_inner(self) -> WorldResult<WorldState> {
        self.world.into_inner().map_err(|_| WorldError::GatePoisoned)
    }
}

/// Proof of holding the gate.  Derefs to the guarded [`WorldState`].
#[derive(Debug)]
pub struct GateGuard<'a> {
    inner: MutexGuard<'a, WorldState>,
}

impl GateGuard<'_> {
    /// Release the gate explicitly.  Equivalent to dropping the guard.
    #[inline]
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for GateGuard<'_> {
    type Target = WorldState;
    #[inline]
    fn deref(&self) -> &WorldState {
        &self.inner
    }
}

impl DerefMut for GateGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut WorldState {
        &mut self.inner
    }
}
