//! Processor panel: execution log and run state display

use crate::session::panel::{ExecutionControlPanel, Panel, PanelKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Paused,
    Finished,
}

pub struct ProcessorPanel {
    log: Vec<String>,
    run_state: RunState,
}

impl ProcessorPanel {
    pub fn new() -> Self {
        Self {
            log: Vec::new(),
            run_state: RunState::Idle,
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn append(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }
}

impl Default for ProcessorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ProcessorPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Processor
    }
}

impl ExecutionControlPanel for ProcessorPanel {
    fn pause(&mut self) {
        self.run_state = RunState::Paused;
        self.append("execution paused");
    }

    fn processor_finished(&mut self) {
        self.run_state = RunState::Finished;
        self.append("processor finished");
    }

    fn run_finished(&mut self) {
        self.run_state = RunState::Finished;
        self.append("run finished");
    }

    fn print_to_log(&mut self, text: &str) {
        for line in text.trim_end_matches('\n').lines() {
            self.append(format!("> {line}"));
        }
    }
}
