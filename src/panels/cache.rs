//! Cache panel: cache view with a movable focus address
//!
//! Moving the focus emits `FocusAddressChanged`, which the coordinator
//! relays to the memory panel so it re-centers on the same address.
//! Replacement policy and hit/miss modeling belong to the cache simulator,
//! not this view.

use crate::session::events::{EventQueue, SessionEvent};
use crate::session::panel::{Panel, PanelKind};

/// Cache line size the view navigates by.
pub const LINE_BYTES: u64 = 64;

pub struct CachePanel {
    queue: EventQueue,
    focus_address: u64,
}

impl CachePanel {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            queue,
            focus_address: 0x1_0000,
        }
    }

    pub fn focus_address(&self) -> u64 {
        self.focus_address
    }

    /// Move the focused cache line and notify interested panels.
    pub fn set_focus(&mut self, addr: u64) {
        let aligned = addr & !(LINE_BYTES - 1);
        if aligned != self.focus_address {
            self.focus_address = aligned;
            self.queue
                .push(SessionEvent::FocusAddressChanged(aligned));
        }
    }

    pub fn focus_next_line(&mut self) {
        self.set_focus(self.focus_address.saturating_add(LINE_BYTES));
    }

    pub fn focus_prev_line(&mut self) {
        self.set_focus(self.focus_address.saturating_sub(LINE_BYTES));
    }
}

impl Panel for CachePanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Cache
    }
}
