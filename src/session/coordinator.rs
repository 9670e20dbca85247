//! The session coordinator
//!
//! Single dispatcher for the whole workbench: user/menu actions and backend
//! events arrive as discrete [`SessionEvent`]s, and the coordinator updates
//! the document state machine, decides panel-visibility transitions through
//! the [`PanelRegistry`], and relays events to the panels that registered
//! interest. It also implements the modal workflows: new, load, load
//! example, save, save as, and close.
//!
//! # Modal boundaries
//!
//! Every prompt goes through [`DialogService`], which blocks until the user
//! answers. Cancelling any prompt leaves all state exactly as it was before
//! the workflow began; backend events arriving while a prompt is open wait
//! in the shared queue and are drained afterwards.

use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use crate::assets::{self, ExampleAsset};
use crate::backend::io::SystemIo;
use crate::backend::proxy::{ExecutionBackend, ExecutionBackendProxy};
use crate::backend::Program;
use crate::session::document::{DocumentState, LoadSource, SavePaths};
use crate::session::events::{EventBus, EventKind, EventQueue, SessionEvent};
use crate::session::panel::{
    AddressViewPanel, EditableDocumentPanel, ExecutionControlPanel, FileSource, LoadFileParams,
    OutputSinkPanel, Panel, PanelKind, PanelRegistry, SourceKind,
};
use crate::session::status::{StatusAggregator, StatusChannel};
use crate::session::{SessionError, Shared};

/// Answer to a three-way save confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Save,
    Discard,
    Cancel,
}

/// How a modal workflow ended. Cancellation is a normal outcome: the
/// workflow aborted and no state mutation survived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Modal presentation boundary. Implementations block until the user
/// answers; the TUI provides one over the terminal, tests script it.
pub trait DialogService {
    fn confirm_save(&mut self, prompt: &str) -> ConfirmChoice;
    /// Load dialog; `None` when rejected.
    fn load_file(&mut self) -> Option<LoadFileParams>;
    /// Save dialog; `None` when rejected. Either path may be absent.
    fn save_paths(&mut self) -> Option<SavePaths>;
    /// Blocking notice for resource failures.
    fn warn(&mut self, title: &str, message: &str);
    /// Settings dialog; no return value is consumed.
    fn settings(&mut self);
}

/// Event-kind to status-channel routing, applied once per dispatched event.
const STATUS_ROUTES: &[(EventKind, StatusChannel)] = &[
    (EventKind::ProgramLoaded, StatusChannel::Processor),
    (EventKind::RunFinished, StatusChannel::Processor),
    (EventKind::ExecutionFinished, StatusChannel::Processor),
    (EventKind::Stopping, StatusChannel::Processor),
    (EventKind::SyscallStatus, StatusChannel::Syscall),
    (EventKind::OutputProduced, StatusChannel::SystemIo),
];

pub struct SessionCoordinator {
    registry: PanelRegistry,
    document: DocumentState,
    status: StatusAggregator,
    bus: EventBus,
    proxy: ExecutionBackendProxy,
    backend: Shared<dyn ExecutionBackend>,
    editor: Shared<dyn EditableDocumentPanel>,
    /// Set immediately before the session closes; observable by any external
    /// listener that must flush state before teardown.
    shutdown: Rc<Cell<bool>>,
}

impl SessionCoordinator {
    /// Build the session: register the five panels, wire the cross-panel
    /// links, and activate the initial panel (Processor).
    #[allow(clippy::too_many_arguments)]
    pub fn new<E, P, C, M, I, B>(
        editor: Shared<E>,
        processor: Shared<P>,
        cache: Shared<C>,
        memory: Shared<M>,
        io_panel: Shared<I>,
        backend: Shared<B>,
        system_io: Shared<SystemIo>,
        queue: EventQueue,
    ) -> Result<Self, SessionError>
    where
        E: EditableDocumentPanel + 'static,
        P: ExecutionControlPanel + 'static,
        C: Panel + 'static,
        M: AddressViewPanel + 'static,
        I: OutputSinkPanel + 'static,
        B: ExecutionBackend + 'static,
    {
        let mut registry = PanelRegistry::new();
        registry.register(PanelKind::Editor, editor.clone())?;
        registry.register(PanelKind::Processor, processor.clone())?;
        registry.register(PanelKind::Cache, cache)?;
        registry.register(PanelKind::Memory, memory.clone())?;
        registry.register(PanelKind::Io, io_panel.clone())?;

        // Cross-panel links. Registered once here; the coordinator owns
        // their lifetime and drops them at teardown.
        let mut bus = EventBus::new();
        {
            let ed = editor.clone();
            let be = backend.clone();
            bus.subscribe(
                EventKind::ProgramChanged,
                Box::new(move |_| {
                    let program = {
                        let e = ed.borrow();
                        Program {
                            source: e.assembly_text(),
                            binary: e.binary_data(),
                        }
                    };
                    be.borrow_mut().load_program(program);
                }),
            );
        }
        {
            let p = processor.clone();
            bus.subscribe(
                EventKind::RunFinished,
                Box::new(move |_| p.borrow_mut().run_finished()),
            );
        }
        {
            let p = processor.clone();
            bus.subscribe(
                EventKind::ExecutionFinished,
                Box::new(move |_| p.borrow_mut().processor_finished()),
            );
        }
        {
            let p = processor.clone();
            bus.subscribe(
                EventKind::Stopping,
                Box::new(move |_| p.borrow_mut().pause()),
            );
        }
        {
            let p = processor.clone();
            bus.subscribe(
                EventKind::OutputProduced,
                Box::new(move |event| {
                    if let SessionEvent::OutputProduced(text) = event {
                        p.borrow_mut().print_to_log(text);
                    }
                }),
            );
        }
        {
            let io = io_panel.clone();
            bus.subscribe(
                EventKind::OutputProduced,
                Box::new(move |event| {
                    if let SessionEvent::OutputProduced(text) = event {
                        io.borrow_mut().append_output(text);
                    }
                }),
            );
        }
        {
            let io = io_panel.clone();
            bus.subscribe(
                EventKind::Reset,
                Box::new(move |_| io.borrow_mut().clear_output()),
            );
        }
        {
            let m = memory.clone();
            bus.subscribe(
                EventKind::FocusAddressChanged,
                Box::new(move |event| {
                    if let SessionEvent::FocusAddressChanged(addr) = event {
                        m.borrow_mut().set_central_address(*addr);
                    }
                }),
            );
        }
        {
            let ed = editor.clone();
            bus.subscribe(
                EventKind::ProcessorChanged,
                Box::new(move |_| ed.borrow_mut().refresh_exec_highlight()),
            );
        }
        {
            let ed = editor.clone();
            bus.subscribe(
                EventKind::ActivePanelChanged,
                Box::new(move |_| ed.borrow_mut().refresh_exec_highlight()),
            );
        }

        let proxy = ExecutionBackendProxy::new(queue, system_io);

        let mut coordinator = Self {
            registry,
            document: DocumentState::new(),
            status: StatusAggregator::new(),
            bus,
            proxy,
            backend,
            editor,
            shutdown: Rc::new(Cell::new(false)),
        };
        coordinator.switch_panel(PanelKind::Processor)?;
        Ok(coordinator)
    }

    // --- event dispatch -------------------------------------------------

    /// Dispatch one event: update coordinator-owned state, route status
    /// text, then relay to subscribed panels.
    pub fn dispatch(&mut self, event: SessionEvent) {
        match &event {
            SessionEvent::EditorStateChanged { dirty } => {
                if *dirty {
                    self.document.edited();
                }
            }
            SessionEvent::Reset => {
                for channel in StatusChannel::ALL {
                    self.status.clear(channel);
                }
            }
            _ => {}
        }
        for (kind, channel) in STATUS_ROUTES {
            if event.kind() == *kind {
                self.status.set_text(*channel, status_text(&event));
            }
        }
        self.bus.publish(&event);
    }

    /// Drain the shared queue and dispatch everything in emission order.
    /// Returns the number of events handled.
    pub fn pump_events(&mut self) -> usize {
        let events = self.proxy.drain();
        let count = events.len();
        for event in events {
            self.dispatch(event);
        }
        count
    }

    pub fn has_pending_events(&self) -> bool {
        self.proxy.has_pending()
    }

    // --- workflows ------------------------------------------------------

    /// Tab switch: activate the requested panel and let the editor refresh
    /// its execution-position highlight.
    pub fn switch_panel(&mut self, kind: PanelKind) -> Result<(), SessionError> {
        self.registry.activate(kind)?;
        self.dispatch(SessionEvent::ActivePanelChanged(kind));
        Ok(())
    }

    /// New Program. Prompts to save when unsaved work could be lost; the
    /// Save answer aborts the workflow if the nested save does not complete.
    pub fn new_program(&mut self, dialogs: &mut dyn DialogService) -> Outcome {
        let editor_empty = self.editor.borrow().assembly_text().is_empty();
        let must_prompt =
            self.document.is_dirty() || (!editor_empty && !self.document.has_location());
        if must_prompt {
            match dialogs.confirm_save("Save program before creating a new file?") {
                ConfirmChoice::Cancel => return Outcome::Cancelled,
                ConfirmChoice::Save => {
                    if self.save(dialogs) != Outcome::Completed || !self.document.has_location() {
                        // Save dialog was rejected.
                        return Outcome::Cancelled;
                    }
                }
                ConfirmChoice::Discard => {}
            }
        }
        self.document.new_document();
        self.editor.borrow_mut().new_program();
        self.dispatch(SessionEvent::ProgramChanged);
        log::debug!("new program created");
        Outcome::Completed
    }

    /// Load Program: pause any running execution, present the load dialog,
    /// and hand the descriptor to the editor. Pausing a running backend
    /// emits `Stopping`, which reaches the processor panel through the bus;
    /// an idle backend emits nothing and the panel stays untouched.
    pub fn load_program(&mut self, dialogs: &mut dyn DialogService) -> Outcome {
        self.backend.borrow_mut().pause();
        let Some(params) = dialogs.load_file() else {
            return Outcome::Cancelled;
        };
        match self.load_file(&params) {
            Ok(()) => Outcome::Completed,
            Err(e) => {
                log::warn!("load failed: {e}");
                dialogs.warn("Load failed", &e.to_string());
                Outcome::Cancelled
            }
        }
    }

    /// Non-modal load used by the load workflow and by the command line.
    pub fn load_file(&mut self, params: &LoadFileParams) -> Result<(), SessionError> {
        let source = match (&params.source, params.kind) {
            (FileSource::Disk(path), SourceKind::ExternalElf) => {
                LoadSource::ExternalBinary(path.clone())
            }
            (FileSource::Disk(path), _) => LoadSource::UserFile(path.clone()),
            (FileSource::Bundled { name, .. }, _) => LoadSource::ExampleAsset((*name).to_string()),
        };
        self.load_file_as(params, source)
    }

    fn load_file_as(
        &mut self,
        params: &LoadFileParams,
        source: LoadSource,
    ) -> Result<(), SessionError> {
        {
            let mut editor = self.editor.borrow_mut();
            editor.load_external_file(params)?;
            // Loading replaces the buffer and drops any stale highlight;
            // recompute it for the freshly loaded program.
            editor.refresh_exec_highlight();
        }
        self.document.external_load(source);
        self.dispatch(SessionEvent::ProgramChanged);
        Ok(())
    }

    /// Load a bundled example. ELF assets are materialized to a scoped
    /// temporary file first; the temp copy is removed when the handle drops,
    /// load outcome notwithstanding. A failed materialization warns the user
    /// and mutates nothing.
    pub fn load_example(
        &mut self,
        asset: &'static ExampleAsset,
        dialogs: &mut dyn DialogService,
    ) -> Outcome {
        let source = LoadSource::ExampleAsset(asset.name.to_string());
        let result = match asset.kind {
            SourceKind::ExternalElf => match assets::materialize(asset) {
                Ok(tmp) => {
                    let params = LoadFileParams {
                        source: FileSource::Disk(tmp.path().to_path_buf()),
                        kind: asset.kind,
                    };
                    self.load_file_as(&params, source)
                }
                Err(e) => Err(e),
            },
            _ => {
                let params = LoadFileParams {
                    source: FileSource::Bundled {
                        name: asset.name,
                        bytes: asset.bytes,
                    },
                    kind: asset.kind,
                };
                self.load_file_as(&params, source)
            }
        };
        match result {
            Ok(()) => Outcome::Completed,
            Err(e) => {
                log::warn!("loading example {} failed: {e}", asset.name);
                dialogs.warn("Error", &e.to_string());
                Outcome::Cancelled
            }
        }
    }

    /// Save. Prompts for destination paths only when no location exists;
    /// afterwards writes silently to the remembered paths.
    pub fn save(&mut self, dialogs: &mut dyn DialogService) -> Outcome {
        let paths = if self.document.can_save_quickly() {
            self.document.save_paths().clone()
        } else {
            match dialogs.save_paths() {
                Some(paths) if !paths.is_empty() => paths,
                _ => {
                    self.document.save_cancelled();
                    return Outcome::Cancelled;
                }
            }
        };
        self.write_artifacts(&paths, dialogs)
    }

    /// Save As: always prompts for a location, then delegates to the save
    /// write logic.
    pub fn save_as(&mut self, dialogs: &mut dyn DialogService) -> Outcome {
        match dialogs.save_paths() {
            Some(paths) if !paths.is_empty() => self.write_artifacts(&paths, dialogs),
            _ => {
                self.document.save_cancelled();
                Outcome::Cancelled
            }
        }
    }

    fn write_artifacts(&mut self, paths: &SavePaths, dialogs: &mut dyn DialogService) -> Outcome {
        match self.try_write(paths) {
            Ok(true) => {
                self.document.save_completed(paths.clone());
                log::debug!("saved to {:?}", paths);
                Outcome::Completed
            }
            // Paths chosen but nothing was derivable to write; not an error.
            Ok(false) => Outcome::Completed,
            Err(e) => {
                log::warn!("save failed: {e}");
                dialogs.warn("Save failed", &e.to_string());
                Outcome::Cancelled
            }
        }
    }

    /// Writes are independent per artifact: text if a text path is set,
    /// binary if a binary path is set and binary content is derivable.
    fn try_write(&self, paths: &SavePaths) -> Result<bool, SessionError> {
        let mut wrote = false;
        if let Some(path) = &paths.assembly {
            fs::write(path, self.editor.borrow().assembly_text())?;
            wrote = true;
        }
        if let Some(path) = &paths.binary {
            if let Some(bytes) = self.editor.borrow().binary_data() {
                fs::write(path, bytes)?;
                wrote = true;
            }
        }
        Ok(wrote)
    }

    /// Close. Prompts when the editor holds unsaved content; Cancel vetoes
    /// the close entirely, and a cancelled nested save cancels the close as
    /// well. On a completed close the shutdown flag is set for listeners
    /// that must flush state before teardown.
    pub fn close(&mut self, dialogs: &mut dyn DialogService) -> Outcome {
        let (enabled, empty) = {
            let editor = self.editor.borrow();
            (editor.is_editor_enabled(), editor.assembly_text().is_empty())
        };
        if enabled && !empty {
            match dialogs.confirm_save("Save current program before exiting?") {
                ConfirmChoice::Cancel => return Outcome::Cancelled,
                ConfirmChoice::Save => {
                    if self.save(dialogs) != Outcome::Completed || !self.document.has_location() {
                        return Outcome::Cancelled;
                    }
                }
                ConfirmChoice::Discard => {}
            }
        }
        self.shutdown.set(true);
        self.bus.clear();
        log::debug!("session closed");
        Outcome::Completed
    }

    /// Settings dialog: presented modally, no return value consumed.
    pub fn open_settings(&mut self, dialogs: &mut dyn DialogService) {
        dialogs.settings();
    }

    // --- accessors ------------------------------------------------------

    pub fn current_panel(&self) -> Option<PanelKind> {
        self.registry.current()
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    pub fn status(&self) -> &StatusAggregator {
        &self.status
    }

    /// Whether Save/Save As actions apply right now.
    pub fn save_enabled(&self) -> bool {
        self.editor.borrow().is_editor_enabled()
    }

    /// Observable process-wide shutdown flag.
    pub fn shutdown_signal(&self) -> Rc<Cell<bool>> {
        self.shutdown.clone()
    }
}

impl Drop for SessionCoordinator {
    fn drop(&mut self) {
        // Subscriptions hold panel handles; drop them with the session.
        self.bus.clear();
    }
}

fn status_text(event: &SessionEvent) -> String {
    match event {
        SessionEvent::ProgramLoaded => "program loaded".to_string(),
        SessionEvent::RunFinished => "run finished".to_string(),
        SessionEvent::ExecutionFinished { fault: Some(fault) } => format!("stopped: {fault}"),
        SessionEvent::ExecutionFinished { fault: None } => "execution finished".to_string(),
        SessionEvent::Stopping => "paused".to_string(),
        SessionEvent::SyscallStatus(text) => text.clone(),
        SessionEvent::OutputProduced(text) => text.trim_end().to_string(),
        _ => String::new(),
    }
}
