//! Panel identities, capability traits, and the panel registry
//!
//! The workbench is composed of a fixed, ordered set of panels. Each panel
//! exposes a uniform surface ([`Panel`]) for visibility transitions, plus
//! narrow capability traits for the roles the coordinator actually needs
//! ([`EditableDocumentPanel`], [`ExecutionControlPanel`], [`AddressViewPanel`],
//! [`OutputSinkPanel`]). Storing narrow interfaces per role avoids casting a
//! generic panel handle back to its concrete type at every use site.
//!
//! # Visibility invariant
//!
//! Once activation begins, exactly one panel is visible at any time.
//! [`PanelRegistry::activate`] deactivates the old panel (hook first, then
//! its toolbar) before activating the new one, and never leaves the registry
//! with zero or two visible panels at an observable point.

use std::path::PathBuf;

use crate::session::{SessionError, Shared};

/// The fixed set of panels composing the session, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Editor,
    Processor,
    Cache,
    Memory,
    Io,
}

impl PanelKind {
    /// All panels in tab order.
    pub const ALL: [PanelKind; 5] = [
        PanelKind::Editor,
        PanelKind::Processor,
        PanelKind::Cache,
        PanelKind::Memory,
        PanelKind::Io,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Editor => "Editor",
            PanelKind::Processor => "Processor",
            PanelKind::Cache => "Cache",
            PanelKind::Memory => "Memory",
            PanelKind::Io => "I/O",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PanelKind::Editor => 0,
            PanelKind::Processor => 1,
            PanelKind::Cache => 2,
            PanelKind::Memory => 3,
            PanelKind::Io => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next panel in tab order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous panel in tab order, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Kind of program source handed to the editor's external-load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Assembly,
    C,
    ExternalElf,
}

/// Where the bytes of an externally loaded program come from.
///
/// Bundled assets load straight from the binary; precompiled ELF assets are
/// materialized to a real path first because the loader reads files.
#[derive(Debug, Clone)]
pub enum FileSource {
    Disk(PathBuf),
    Bundled {
        name: &'static str,
        bytes: &'static [u8],
    },
}

/// Typed descriptor returned by the load dialog and the examples menu.
#[derive(Debug, Clone)]
pub struct LoadFileParams {
    pub source: FileSource,
    pub kind: SourceKind,
}

/// Uniform capability surface every panel exposes to the registry.
pub trait Panel {
    fn kind(&self) -> PanelKind;

    /// Activation/deactivation hook. A panel may refresh internal state here;
    /// the registry only guarantees ordering (deactivate-old before
    /// activate-new).
    fn visibility_changed(&mut self, _visible: bool) {}
}

/// The editor panel role: document content, external loads, save artifacts.
pub trait EditableDocumentPanel: Panel {
    fn load_external_file(&mut self, params: &LoadFileParams) -> Result<(), SessionError>;
    fn new_program(&mut self);
    fn assembly_text(&self) -> String;
    /// Raw binary image, when one is currently derivable (e.g. a loaded ELF).
    fn binary_data(&self) -> Option<Vec<u8>>;
    fn is_editor_enabled(&self) -> bool;
    /// Recompute the execution-position highlight. Depends on which panel is
    /// visible and on the active processor, not just on program state.
    fn refresh_exec_highlight(&mut self);
}

/// The processor panel role: execution lifecycle display and control.
pub trait ExecutionControlPanel: Panel {
    fn pause(&mut self);
    fn processor_finished(&mut self);
    fn run_finished(&mut self);
    fn print_to_log(&mut self, text: &str);
}

/// A panel that can re-center its view on an address (the memory view).
pub trait AddressViewPanel: Panel {
    fn set_central_address(&mut self, addr: u64);
}

/// A panel that displays program output (the I/O view).
pub trait OutputSinkPanel: Panel {
    fn append_output(&mut self, text: &str);
    /// Drop displayed output; invoked when a reset passes through the feed.
    fn clear_output(&mut self);
}

struct PanelEntry {
    kind: PanelKind,
    panel: Shared<dyn Panel>,
    visible: bool,
    toolbar_visible: bool,
}

/// Ordered registry of the session's panels.
///
/// Registration is a startup-only operation; once [`activate`] has been
/// called the set is frozen. Visibility is mutated only through
/// [`activate`], which keeps the one-visible-panel invariant.
///
/// [`activate`]: PanelRegistry::activate
#[derive(Default)]
pub struct PanelRegistry {
    entries: Vec<PanelEntry>,
    current: Option<PanelKind>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel. Fails once activation has begun or if the identity
    /// is already registered.
    pub fn register(&mut self, kind: PanelKind, panel: Shared<dyn Panel>) -> Result<(), SessionError> {
        if self.current.is_some() {
            return Err(SessionError::Configuration(
                "panels cannot be registered after activation begins".into(),
            ));
        }
        if self.entries.iter().any(|e| e.kind == kind) {
            return Err(SessionError::Configuration(format!(
                "panel {:?} registered twice",
                kind
            )));
        }
        self.entries.push(PanelEntry {
            kind,
            panel,
            visible: false,
            toolbar_visible: false,
        });
        Ok(())
    }

    /// Switch the visible panel: deactivate the current one (hook, then
    /// toolbar), then activate the requested one.
    pub fn activate(&mut self, kind: PanelKind) -> Result<(), SessionError> {
        let Some(idx) = self.entries.iter().position(|e| e.kind == kind) else {
            return Err(SessionError::Configuration(format!(
                "panel {:?} is not registered",
                kind
            )));
        };
        if self.current == Some(kind) {
            return Ok(());
        }

        if let Some(old) = self.current {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.kind == old) {
                entry.toolbar_visible = false;
                entry.visible = false;
                entry.panel.borrow_mut().visibility_changed(false);
            }
        }

        let entry = &mut self.entries[idx];
        entry.visible = true;
        entry.toolbar_visible = true;
        entry.panel.borrow_mut().visibility_changed(true);
        self.current = Some(kind);
        Ok(())
    }

    /// The currently active panel, once activation has begun.
    pub fn current(&self) -> Option<PanelKind> {
        self.current
    }

    pub fn is_visible(&self, kind: PanelKind) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == kind && e.visible)
    }

    pub fn toolbar_visible(&self, kind: PanelKind) -> bool {
        self.entries
            .iter()
            .any(|e| e.kind == kind && e.toolbar_visible)
    }

    /// Number of visible panels; 1 whenever activation has begun.
    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.visible).count()
    }
}
