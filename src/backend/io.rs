//! System I/O layer: the syscall print sink
//!
//! Print requests from the executing program land here. Each print is
//! buffered for the I/O panel and emitted as an `OutputProduced` event on
//! the shared feed. `reset()` drops all buffered output so nothing leaks
//! across a processor reset.

use crate::session::events::{EventQueue, SessionEvent};

pub struct SystemIo {
    queue: EventQueue,
    lines: Vec<String>,
}

impl SystemIo {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            queue,
            lines: Vec::new(),
        }
    }

    /// Syscall-driven print: buffer the text and emit it on the feed.
    pub fn do_print(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            match self.lines.last_mut() {
                Some(last) if !last.ends_with('\n') => last.push_str(line),
                _ => self.lines.push(line.to_string()),
            }
        }
        self.queue.push(SessionEvent::OutputProduced(text.to_string()));
    }

    /// Clear buffered output. Invoked by the proxy whenever a reset passes
    /// through the feed.
    pub fn reset(&mut self) {
        log::debug!("system i/o reset, dropping {} buffered lines", self.lines.len());
        self.lines.clear();
    }

    /// Buffered output lines, oldest first.
    pub fn output(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.trim_end_matches('\n'))
    }
}
