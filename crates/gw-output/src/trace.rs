//! `TraceRenderer<W>`: bridges `Renderer` to a `TraceWriter`.

use std::sync::{Mutex, MutexGuard};

use gw_sim::Renderer;
use gw_world::AgentState;

use crate::row::TraceRow;
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

struct TraceState<W> {
    writer:     W,
    next_frame: u64,
    last_error: Option<OutputError>,
}

/// A [`Renderer`] that records every snapshot it is shown to a
/// [`TraceWriter`] backend.
///
/// Snapshots arrive from many agent threads; an internal mutex serializes
/// them, so frame numbers follow the order in which `show` was entered.  That
/// is the commit order only up to races between agents that released the
/// gate back to back.
///
/// The final table passed to `on_finish` is written as one last frame, then
/// the writer is flushed.  Errors are stored, not propagated; check
/// [`take_error`][Self::take_error] after the run.
pub struct TraceRenderer<W: TraceWriter> {
    state: Mutex<TraceState<W>>,
}

impl<W: TraceWriter> TraceRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            state: Mutex::new(TraceState { writer, next_frame: 0, last_error: None }),
        }
    }

    /// Take the stored write error (if any) after the run returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<OutputError> {
        self.lock().last_error.take()
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.lock().next_frame
    }

    fn lock(&self) -> MutexGuard<'_, TraceState<W>> {
        // A panicking writer leaves nothing half-updated that matters here.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(state: &mut TraceState<W>, snapshot: &[AgentState]) {
        let frame = state.next_frame;
        state.next_frame += 1;
        let rows: Vec<TraceRow> =
            snapshot.iter().map(|a| TraceRow::from_state(frame, a)).collect();
        if !rows.is_empty() {
            let result = state.writer.write_frame(&rows);
            Self::store_err(state, result);
        }
    }

    fn store_err(state: &mut TraceState<W>, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if state.last_error.is_none() {
                state.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> Renderer for TraceRenderer<W> {
    fn show(&self, snapshot: &[AgentState]) {
        Self::record(&mut self.lock(), snapshot);
    }

    fn on_finish(&self, final_state: &[AgentState]) {
        let mut state = self.lock();
        Self::record(&mut state, final_state);
        let result = state.writer.finish();
        Self::store_err(&mut state, result);
    }
}
