//! Memory panel: address-centered memory view

use crate::session::panel::{AddressViewPanel, Panel, PanelKind};

pub struct MemoryPanel {
    central_address: u64,
}

impl MemoryPanel {
    pub fn new() -> Self {
        Self {
            central_address: 0x1_0000,
        }
    }

    pub fn central_address(&self) -> u64 {
        self.central_address
    }

    pub fn scroll(&mut self, delta: i64) {
        self.central_address = if delta < 0 {
            self.central_address.saturating_sub(delta.unsigned_abs() * 16)
        } else {
            self.central_address.saturating_add(delta as u64 * 16)
        };
    }
}

impl Default for MemoryPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for MemoryPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Memory
    }
}

impl AddressViewPanel for MemoryPanel {
    fn set_central_address(&mut self, addr: u64) {
        self.central_address = addr;
    }
}
