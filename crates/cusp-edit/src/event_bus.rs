//! Event bus for scene notifications

use crate::event::SceneEvent;

/// A simple event queue that the orchestrator pushes to and the shell drains
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<SceneEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events, oldest first
    pub fn pending(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
