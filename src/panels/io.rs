//! I/O panel: program output view

use crate::session::panel::{OutputSinkPanel, Panel, PanelKind};

pub struct IoPanel {
    lines: Vec<String>,
}

impl IoPanel {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for IoPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for IoPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Io
    }
}

impl OutputSinkPanel for IoPanel {
    fn append_output(&mut self, text: &str) {
        for line in text.trim_end_matches('\n').lines() {
            self.lines.push(line.to_string());
        }
    }

    fn clear_output(&mut self) {
        self.lines.clear();
    }
}
