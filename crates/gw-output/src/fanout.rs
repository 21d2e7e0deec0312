//! Forward every renderer call to several sinks.

use std::sync::Arc;

use gw_sim::Renderer;
use gw_world::AgentState;

/// A [`Renderer`] that forwards to each attached sink in attach order.
///
/// Lets the console and a trace file watch the same run without either
/// knowing about the other.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Arc<dyn Renderer>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach another sink.
    pub fn with(mut self, sink: Arc<dyn Renderer>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Renderer for FanOut {
    fn show(&self, snapshot: &[AgentState]) {
        for sink in &self.sinks {
            sink.show(snapshot);
        }
    }

    fn on_arrival(&self, agent: &AgentState) {
        for sink in &self.sinks {
            sink.on_arrival(agent);
        }
    }

    fn on_finish(&self, final_state: &[AgentState]) {
        for sink in &self.sinks {
            sink.on_finish(final_state);
        }
    }
}
