//! ASCII console renderer.
//!
//! Draws the whole field on every frame:
//!
//! ```text
//! +------+
//! |0     |
//! |  1   |
//! |      |
//! +------+
//! ```
//!
//! Rows are indexed by `x` and columns by `y`, each cell two characters wide.
//! Active agents appear as their [`glyph`]; inactive agents are hidden.

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use gw_core::AgentId;
use gw_sim::Renderer;
use gw_world::AgentState;

use crate::OutputError;

/// ANSI "cursor home, clear to end of screen".
const CLEAR: &str = "\x1b[H\x1b[J";

const GLYPHS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Single-character label for an agent: `0`–`9`, then `a`–`z`, then `A`–`Z`.
/// Ids past that all draw as `#`.
pub fn glyph(id: AgentId) -> char {
    GLYPHS.get(id.index()).map_or('#', |&b| b as char)
}

/// Render one frame, border included, without the clear-screen prefix.
///
/// Agents outside `[0, field_size)²` are skipped.  Where two active agents
/// share a cell the higher id is drawn.
pub fn render_frame(snapshot: &[AgentState], field_size: i32) -> String {
    let n = field_size.max(0) as usize;
    let mut cells = vec![' '; n * n];
    for agent in snapshot.iter().filter(|a| a.active) {
        if agent.position.in_bounds(field_size) {
            let (x, y) = (agent.position.x as usize, agent.position.y as usize);
            cells[x * n + y] = glyph(agent.id);
        }
    }

    let border = format!("+{}+\n", "--".repeat(n));
    let mut out = String::with_capacity((2 * n + 3) * (n + 2));
    out.push_str(&border);
    for row in cells.chunks(n.max(1)).take(n) {
        out.push('|');
        for &c in row {
            out.push(c);
            out.push(' ');
        }
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

struct ConsoleState<W> {
    out:        W,
    last_error: Option<OutputError>,
}

/// Redraws the field on a terminal after every move.
///
/// Output is serialized by an internal mutex, so frames from different agent
/// threads never interleave.  The optional frame delay is slept after the
/// mutex is released and only slows the agent that moved.
pub struct ConsoleRenderer<W: Write + Send> {
    state:       Mutex<ConsoleState<W>>,
    field_size:  i32,
    frame_delay: Duration,
    clear:       bool,
}

impl ConsoleRenderer<Stdout> {
    /// Render to standard output with screen clearing on.
    pub fn stdout(field_size: i32) -> Self {
        Self::new(io::stdout(), field_size)
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn new(out: W, field_size: i32) -> Self {
        Self {
            state: Mutex::new(ConsoleState { out, last_error: None }),
            field_size,
            frame_delay: Duration::ZERO,
            clear: true,
        }
    }

    /// Sleep this long after drawing each frame.
    pub fn frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Emit the ANSI clear sequence before each frame (on by default).
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&self) -> Option<OutputError> {
        self.lock().last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .out
    }

    fn lock(&self) -> MutexGuard<'_, ConsoleState<W>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, text: &str) {
        let mut state = self.lock();
        let result = state.out.write_all(text.as_bytes()).and_then(|()| state.out.flush());
        if let Err(e) = result {
            if state.last_error.is_none() {
                state.last_error = Some(e.into());
            }
        }
    }
}

impl<W: Write + Send> Renderer for ConsoleRenderer<W> {
    fn show(&self, snapshot: &[AgentState]) {
        let mut text = String::new();
        if self.clear {
            text.push_str(CLEAR);
        }
        text.push_str(&render_frame(snapshot, self.field_size));
        self.emit(&text);

        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
    }

    fn on_arrival(&self, agent: &AgentState) {
        self.emit(&format!("Agent {} reached target {}\n", agent.id.0, agent.target));
    }

    fn on_finish(&self, _final_state: &[AgentState]) {
        self.emit("Simulation complete.\n");
    }
}
