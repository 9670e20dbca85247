//! Minimal in-process execution backend
//!
//! [`ProcessorHandler`] stands in for the full simulator: it tracks the
//! loaded program and emits the lifecycle events a real engine would, in the
//! order a real engine would produce them. Execution advances one line per
//! [`tick`], driven from the host event loop, so a run can be paused midway.
//! Good enough to drive the coordinator, the processor panel, and the tests;
//! instruction semantics are out of scope.
//!
//! [`tick`]: ProcessorHandler::tick

use crate::backend::io::SystemIo;
use crate::backend::proxy::ExecutionBackend;
use crate::backend::Program;
use crate::session::events::{EventQueue, SessionEvent};
use crate::session::Shared;

pub struct ProcessorHandler {
    queue: EventQueue,
    io: Shared<SystemIo>,
    program: Option<Program>,
    running: bool,
    /// Next source line to retire, 0-based.
    pc_line: usize,
    processor_name: String,
}

impl ProcessorHandler {
    pub fn new(queue: EventQueue, io: Shared<SystemIo>) -> Self {
        Self {
            queue,
            io,
            program: None,
            running: false,
            pc_line: 0,
            processor_name: "RV64 single-cycle".to_string(),
        }
    }

    pub fn loaded_program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    pub fn processor_name(&self) -> &str {
        &self.processor_name
    }

    pub fn pc_line(&self) -> usize {
        self.pc_line
    }

    /// Swap the processor model. Emits `ProcessorChanged` so views depending
    /// on the active processor can refresh.
    pub fn select_processor(&mut self, name: &str) {
        self.processor_name = name.to_string();
        self.queue.push(SessionEvent::ProcessorChanged);
    }

    fn instruction_count(program: &Program) -> usize {
        if program.source.is_empty() {
            // ELF image: one instruction per word.
            program.binary.as_ref().map_or(0, |b| b.len() / 4)
        } else {
            program
                .source
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.ends_with(':'))
                .count()
        }
    }

    /// Retire one instruction of the current run. Emits the terminal events
    /// when the program completes.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        let Some(program) = &self.program else {
            self.running = false;
            return;
        };
        let total = Self::instruction_count(program);
        if self.pc_line + 1 < total {
            self.pc_line += 1;
            return;
        }

        self.pc_line = total;
        self.running = false;
        self.queue
            .push(SessionEvent::SyscallStatus("ecall 93 (exit)".to_string()));
        self.io.borrow_mut().do_print(&format!(
            "program exited with code 0 after {total} instructions\n"
        ));
        self.queue.push(SessionEvent::RunFinished);
        self.queue
            .push(SessionEvent::ExecutionFinished { fault: None });
    }

    /// Drive the current run to completion (tests and the fast-forward key).
    pub fn run_to_completion(&mut self) {
        while self.running {
            self.tick();
        }
    }
}

impl ExecutionBackend for ProcessorHandler {
    fn load_program(&mut self, program: Program) {
        log::debug!(
            "loading program: {} source bytes, binary {}",
            program.source.len(),
            program.binary.as_ref().map_or(0, Vec::len)
        );
        self.running = false;
        self.pc_line = 0;
        self.program = Some(program);
        self.queue.push(SessionEvent::ProgramLoaded);
    }

    fn run(&mut self) {
        let Some(program) = &self.program else {
            self.queue.push(SessionEvent::ExecutionFinished {
                fault: Some("no program loaded".to_string()),
            });
            return;
        };
        if program.is_empty() || Self::instruction_count(program) == 0 {
            self.queue.push(SessionEvent::ExecutionFinished {
                fault: Some("program is empty".to_string()),
            });
            return;
        }
        self.pc_line = 0;
        self.running = true;
    }

    fn pause(&mut self) {
        if self.running {
            self.running = false;
            self.queue.push(SessionEvent::Stopping);
        }
    }

    fn reset(&mut self) {
        self.running = false;
        self.pc_line = 0;
        self.queue.push(SessionEvent::Reset);
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
