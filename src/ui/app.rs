//! Main TUI application state and logic

use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::{backend::Backend, Frame, Terminal};

use crate::backend::{ExecutionBackend, ProcessorHandler, SystemIo};
use crate::panels::{CachePanel, EditorPanel, IoPanel, MemoryPanel, ProcessorPanel};
use crate::session::coordinator::{Outcome, SessionCoordinator};
use crate::session::events::EventQueue;
use crate::session::panel::{EditableDocumentPanel, FileSource, LoadFileParams, PanelKind};
use crate::session::SessionError;
use crate::ui::dialogs::{kind_for_path, ModalDialogs};
use crate::ui::panes;

/// The main application state: the coordinator plus handles to the concrete
/// panels it coordinates, kept here for rendering.
pub struct App {
    coordinator: SessionCoordinator,
    editor: Rc<RefCell<EditorPanel>>,
    processor_panel: Rc<RefCell<ProcessorPanel>>,
    cache: Rc<RefCell<CachePanel>>,
    memory: Rc<RefCell<MemoryPanel>>,
    io_panel: Rc<RefCell<IoPanel>>,
    backend: Rc<RefCell<ProcessorHandler>>,
    should_quit: bool,
    status_message: String,
}

impl App {
    /// Build the default session: the five panels, the system I/O layer,
    /// and the in-process backend, all sharing one event queue.
    pub fn new() -> Result<Self, SessionError> {
        let queue = EventQueue::new();
        let system_io = Rc::new(RefCell::new(SystemIo::new(queue.clone())));
        let editor = Rc::new(RefCell::new(EditorPanel::new(queue.clone())));
        let processor_panel = Rc::new(RefCell::new(ProcessorPanel::new()));
        let cache = Rc::new(RefCell::new(CachePanel::new(queue.clone())));
        let memory = Rc::new(RefCell::new(MemoryPanel::new()));
        let io_panel = Rc::new(RefCell::new(IoPanel::new()));
        let backend = Rc::new(RefCell::new(ProcessorHandler::new(
            queue.clone(),
            system_io.clone(),
        )));

        let coordinator = SessionCoordinator::new(
            editor.clone(),
            processor_panel.clone(),
            cache.clone(),
            memory.clone(),
            io_panel.clone(),
            backend.clone(),
            system_io,
            queue,
        )?;

        Ok(Self {
            coordinator,
            editor,
            processor_panel,
            cache,
            memory,
            io_panel,
            backend,
            should_quit: false,
            status_message: String::from("Ready"),
        })
    }

    /// Load a program given on the command line.
    pub fn load_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let params = LoadFileParams {
            source: FileSource::Disk(path.to_path_buf()),
            kind: kind_for_path(path),
        };
        self.coordinator.load_file(&params)?;
        self.status_message = format!("Loaded {}", path.display());
        Ok(())
    }

    /// Run the TUI event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            // Advance any running execution, then drain the event feed.
            self.backend.borrow_mut().tick();
            self.coordinator.pump_events();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key, terminal);
                    }
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let active = self.coordinator.current_panel();
        panes::render_tab_bar(frame, chunks[0], active);

        match active {
            Some(PanelKind::Editor) | None => {
                panes::render_editor_pane(frame, chunks[1], &self.editor.borrow(), true);
            }
            Some(PanelKind::Processor) => {
                let backend = self.backend.borrow();
                panes::render_processor_pane(
                    frame,
                    chunks[1],
                    &self.processor_panel.borrow(),
                    backend.processor_name(),
                    backend.is_running(),
                    true,
                );
            }
            Some(PanelKind::Cache) => {
                panes::render_cache_pane(frame, chunks[1], &self.cache.borrow(), true);
            }
            Some(PanelKind::Memory) => {
                let backend = self.backend.borrow();
                let image = backend.loaded_program().and_then(|p| p.binary.as_deref());
                panes::render_memory_pane(frame, chunks[1], &self.memory.borrow(), image, true);
            }
            Some(PanelKind::Io) => {
                panes::render_io_pane(frame, chunks[1], &self.io_panel.borrow(), true);
            }
        }

        panes::render_status_bar(
            frame,
            chunks[2],
            &self.status_message,
            self.coordinator.document(),
            self.coordinator.status(),
        );
    }

    fn switch_panel(&mut self, kind: PanelKind) {
        if let Err(e) = self.coordinator.switch_panel(kind) {
            self.status_message = e.to_string();
        }
    }

    fn handle_key_event<B: Backend>(&mut self, key: KeyEvent, terminal: &mut Terminal<B>) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global bindings first.
        if ctrl {
            match key.code {
                KeyCode::Char('q') => return self.close_requested(terminal),
                KeyCode::Char('n') => return self.new_program(terminal),
                KeyCode::Char('o') => return self.load_program(terminal),
                KeyCode::Char('s') => return self.save(terminal),
                KeyCode::Char('a') => return self.save_as(terminal),
                KeyCode::Char('e') => return self.load_example(terminal),
                KeyCode::Char('g') => {
                    let mut dialogs = ModalDialogs::new(terminal);
                    return self.coordinator.open_settings(&mut dialogs);
                }
                KeyCode::Char('r') => return self.run_program(),
                KeyCode::Char('p') => return self.pause_program(),
                KeyCode::Char('x') => return self.reset_processor(),
                _ => {}
            }
        }
        match key.code {
            KeyCode::Tab => {
                let next = self
                    .coordinator
                    .current_panel()
                    .map_or(PanelKind::Editor, PanelKind::next);
                return self.switch_panel(next);
            }
            KeyCode::BackTab => {
                let prev = self
                    .coordinator
                    .current_panel()
                    .map_or(PanelKind::Editor, PanelKind::prev);
                return self.switch_panel(prev);
            }
            _ => {}
        }

        let active = self.coordinator.current_panel();
        let editing = active == Some(PanelKind::Editor) && self.editor.borrow().is_editor_enabled();

        if editing {
            // Keystrokes go to the buffer; edits flow back as events.
            match key.code {
                KeyCode::Char(c) if !ctrl => self.editor.borrow_mut().insert_char(c),
                KeyCode::Enter => self.editor.borrow_mut().insert_char('\n'),
                KeyCode::Backspace => self.editor.borrow_mut().backspace(),
                KeyCode::Left => self.editor.borrow_mut().move_cursor(-1),
                KeyCode::Right => self.editor.borrow_mut().move_cursor(1),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(kind) = PanelKind::from_index(c as usize - '1' as usize) {
                    self.switch_panel(kind);
                }
            }
            KeyCode::Char('q') => self.close_requested(terminal),
            KeyCode::Char('n') => self.new_program(terminal),
            KeyCode::Char('o') => self.load_program(terminal),
            KeyCode::Char('s') => self.save(terminal),
            KeyCode::Char('a') => self.save_as(terminal),
            KeyCode::Char('e') => self.load_example(terminal),
            KeyCode::Char('r') => self.run_program(),
            KeyCode::Char('p') => self.pause_program(),
            KeyCode::Char('x') => self.reset_processor(),
            KeyCode::Char('f') => {
                self.backend.borrow_mut().run_to_completion();
            }
            KeyCode::Up => match active {
                Some(PanelKind::Cache) => self.cache.borrow_mut().focus_prev_line(),
                Some(PanelKind::Memory) => self.memory.borrow_mut().scroll(-1),
                _ => {}
            },
            KeyCode::Down => match active {
                Some(PanelKind::Cache) => self.cache.borrow_mut().focus_next_line(),
                Some(PanelKind::Memory) => self.memory.borrow_mut().scroll(1),
                _ => {}
            },
            _ => {}
        }
    }

    // --- workflow entry points -----------------------------------------

    fn close_requested<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let mut dialogs = ModalDialogs::new(terminal);
        match self.coordinator.close(&mut dialogs) {
            Outcome::Completed => self.should_quit = true,
            Outcome::Cancelled => self.status_message = String::from("Close cancelled"),
        }
    }

    fn new_program<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let mut dialogs = ModalDialogs::new(terminal);
        self.status_message = match self.coordinator.new_program(&mut dialogs) {
            Outcome::Completed => String::from("New program"),
            Outcome::Cancelled => String::from("New program cancelled"),
        };
    }

    fn load_program<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let mut dialogs = ModalDialogs::new(terminal);
        self.status_message = match self.coordinator.load_program(&mut dialogs) {
            Outcome::Completed => String::from("Program loaded"),
            Outcome::Cancelled => String::from("Load cancelled"),
        };
    }

    fn load_example<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        let mut dialogs = ModalDialogs::new(terminal);
        let Some(asset) = dialogs.pick_example() else {
            self.status_message = String::from("Load cancelled");
            return;
        };
        self.status_message = match self.coordinator.load_example(asset, &mut dialogs) {
            Outcome::Completed => format!("Loaded example {}", asset.name),
            Outcome::Cancelled => String::from("Load cancelled"),
        };
    }

    fn save<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        if !self.coordinator.save_enabled() {
            self.status_message = String::from("Nothing to save");
            return;
        }
        let mut dialogs = ModalDialogs::new(terminal);
        self.status_message = match self.coordinator.save(&mut dialogs) {
            Outcome::Completed => String::from("Saved"),
            Outcome::Cancelled => String::from("Save cancelled"),
        };
    }

    fn save_as<B: Backend>(&mut self, terminal: &mut Terminal<B>) {
        if !self.coordinator.save_enabled() {
            self.status_message = String::from("Nothing to save");
            return;
        }
        let mut dialogs = ModalDialogs::new(terminal);
        self.status_message = match self.coordinator.save_as(&mut dialogs) {
            Outcome::Completed => String::from("Saved"),
            Outcome::Cancelled => String::from("Save cancelled"),
        };
    }

    fn run_program(&mut self) {
        self.backend.borrow_mut().run();
        self.status_message = String::from("Running");
    }

    fn pause_program(&mut self) {
        self.backend.borrow_mut().pause();
        self.status_message = String::from("Paused");
    }

    fn reset_processor(&mut self) {
        self.backend.borrow_mut().reset();
        self.status_message = String::from("Processor reset");
    }
}
