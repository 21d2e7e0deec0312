//! Cooperative pacing: how long an agent sleeps after each step outcome.

use std::time::Duration;

use gw_avoid::BlockReason;
use gw_core::{AgentRng, SimConfig};

/// Sleep durations derived from a [`SimConfig`].  Never applied while the
/// gate is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    move_delay:     Duration,
    yield_min_ms:   u64,
    yield_max_ms:   u64,
    gridlock_pause: Duration,
    poll_interval:  Duration,
}

impl Pacing {
    pub fn from_config(config: &SimConfig) -> Self {
        let t = &config.timing;
        Self {
            move_delay:     Duration::from_millis(config.move_delay_ms),
            yield_min_ms:   t.yield_backoff_min_ms,
            yield_max_ms:   t.yield_backoff_max_ms,
            gridlock_pause: Duration::from_millis(t.gridlock_pause_ms),
            poll_interval:  Duration::from_millis(t.poll_interval_ms),
        }
    }

    /// Pause after a committed move: `speed × move_delay`.
    #[inline]
    pub fn after_move(&self, speed: u32) -> Duration {
        self.move_delay.saturating_mul(speed)
    }

    /// Pause after a blocked step.  Yielding draws a uniform backoff from the
    /// configured range; gridlock always waits the fixed pause.
    pub fn after_block(&self, reason: BlockReason, rng: &mut AgentRng) -> Duration {
        match reason {
            BlockReason::Yield { .. } => {
                Duration::from_millis(rng.gen_range(self.yield_min_ms..=self.yield_max_ms))
            }
            BlockReason::Gridlock => self.gridlock_pause,
        }
    }

    #[inline]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
