//! `gw-output` — `Renderer` sinks for the gridwalk simulator.
//!
//! | Sink                | Output                                                   |
//! |---------------------|----------------------------------------------------------|
//! | [`ConsoleRenderer`] | Bordered ASCII field redrawn in place on any `io::Write` |
//! | [`TraceRenderer`]   | `agent_trace.csv`: one row per agent per frame           |
//! | [`FanOut`]          | Forwards every call to several sinks in order            |
//!
//! Renderer methods have no return value, so the file-backed sinks keep the
//! first error they hit and hand it back from `take_error`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gw_output::{ConsoleRenderer, CsvTraceWriter, FanOut, TraceRenderer};
//!
//! let console = Arc::new(ConsoleRenderer::stdout(config.field_size));
//! let trace = Arc::new(TraceRenderer::new(CsvTraceWriter::new(Path::new("./out"))?));
//! let fan = FanOut::new().with(console).with(trace.clone());
//!
//! let report = SimBuilder::greedy(config).renderer(Arc::new(fan)).build()?.run()?;
//! if let Some(e) = trace.take_error() { eprintln!("trace error: {e}"); }
//! ```

pub mod console;
pub mod csv;
pub mod error;
pub mod fanout;
pub mod row;
pub mod trace;
pub mod writer;


pub use console::{ConsoleRenderer, glyph, render_frame};
pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use fanout::FanOut;
pub use row::TraceRow;
pub use trace::TraceRenderer;
pub use writer::TraceWriter;
