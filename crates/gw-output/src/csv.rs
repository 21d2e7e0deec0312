//! CSV trace backend.
//!
//! Creates `agent_trace.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{OutputResult, TraceRow};

/// Header row of `agent_trace.csv`.
pub const TRACE_HEADER: [&str; 7] =
    ["frame", "agent_id", "x", "y", "target_x", "target_y", "active"];

/// Writes one CSV row per agent per frame.
pub struct CsvTraceWriter {
    trace:    Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create `agent_trace.csv` in `dir` (truncating any previous run) and
    /// write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join("agent_trace.csv"))?;
        trace.write_record(TRACE_HEADER)?;
        Ok(Self { trace, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_frame(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        for row in rows {
            self.trace.write_record(&[
                row.frame.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.target_x.to_string(),
                row.target_y.to_string(),
                (row.active as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        Ok(())
    }
}
