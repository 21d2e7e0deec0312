//! The `TraceWriter` trait implemented by trace backends.

use crate::{OutputResult, TraceRow};

/// A destination for per-frame agent rows.
///
/// Errors are returned here and stored by [`TraceRenderer`][crate::TraceRenderer],
/// which cannot propagate them through the `Renderer` interface.
pub trait TraceWriter: Send {
    /// Write every agent's row for one frame.
    fn write_frame(&mut self, rows: &[TraceRow]) -> OutputResult<()>;

    /// Flush the underlying file handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
