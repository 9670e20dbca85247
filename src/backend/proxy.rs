//! Backend event proxy
//!
//! [`ExecutionBackendProxy`] re-exposes the lifecycle events of the execution
//! engine and the system I/O layer as one ordered feed. It guarantees:
//! - events are drained in the order they were produced (no reordering, no
//!   coalescing);
//! - a `Reset` is always observed by the I/O layer before anything else sees
//!   it, so channel state cannot leak across a reset.
//!
//! Backend faults arrive through the same feed as a terminal
//! `ExecutionFinished { fault }` event; the proxy never retries. Retry
//! policy, if any, belongs to the backend.

use crate::backend::io::SystemIo;
use crate::backend::Program;
use crate::session::events::{EventQueue, SessionEvent};
use crate::session::Shared;

/// Narrow control surface of the external execution engine.
pub trait ExecutionBackend {
    fn load_program(&mut self, program: Program);
    fn run(&mut self);
    fn pause(&mut self);
    fn reset(&mut self);
    fn is_running(&self) -> bool;
}

/// Facade over the backend's event production.
pub struct ExecutionBackendProxy {
    queue: EventQueue,
    io: Shared<SystemIo>,
}

impl ExecutionBackendProxy {
    pub fn new(queue: EventQueue, io: Shared<SystemIo>) -> Self {
        Self { queue, io }
    }

    /// Handle producers use to emit into the feed.
    pub fn queue(&self) -> EventQueue {
        self.queue.clone()
    }

    /// Drain all pending events in emission order. Resets are applied to the
    /// I/O layer here, before any subscriber can observe them.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let events = self.queue.take_all();
        for event in &events {
            if matches!(event, SessionEvent::Reset) {
                self.io.borrow_mut().reset();
            }
        }
        events
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}
