//! Document save-state machine
//!
//! Tracks whether the current program has unsaved changes and whether it has
//! ever been associated with a filesystem location. Four states:
//! `Clean/Dirty × NoLocation/HasLocation`, starting at `Clean+NoLocation`.
//!
//! The machine is the canonical source of truth for enabling Save actions
//! and for the close-confirmation decision. Loading an example or a
//! precompiled binary never establishes a location, since the user has not
//! chosen where *their* copy lives; only a completed save does.

use std::path::PathBuf;

/// Where the current document was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadSource {
    /// Fresh/new document.
    #[default]
    None,
    /// A bundled example asset, by name.
    ExampleAsset(String),
    /// A user-chosen file on disk.
    UserFile(PathBuf),
    /// An external precompiled binary.
    ExternalBinary(PathBuf),
}

/// Destination paths chosen in the save dialog.
///
/// Artifacts are independent: either, both, or neither may be set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavePaths {
    pub assembly: Option<PathBuf>,
    pub binary: Option<PathBuf>,
}

impl SavePaths {
    pub fn is_empty(&self) -> bool {
        self.assembly.is_none() && self.binary.is_none()
    }
}

/// The clean/dirty × location state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentState {
    dirty: bool,
    has_location: bool,
    source: LoadSource,
    save_paths: SavePaths,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any editor-state-changed signal: document becomes dirty, location
    /// association unchanged.
    pub fn edited(&mut self) {
        self.dirty = true;
    }

    /// New document: back to `Clean+NoLocation`, prior association discarded.
    pub fn new_document(&mut self) {
        *self = Self::default();
    }

    /// External load (example asset, user file, or precompiled binary).
    /// Never establishes a location; only an explicit save does.
    pub fn external_load(&mut self, source: LoadSource) {
        self.dirty = false;
        self.has_location = false;
        self.save_paths = SavePaths::default();
        self.source = source;
    }

    /// A confirmed, completed save: `Clean+HasLocation`, remembering the
    /// chosen artifact paths for the silent re-save path.
    pub fn save_completed(&mut self, paths: SavePaths) {
        self.dirty = false;
        self.has_location = true;
        self.save_paths = paths;
    }

    /// A cancelled save prompt leaves the state untouched.
    pub fn save_cancelled(&mut self) {}

    /// True iff a location exists, so Save can silently overwrite rather
    /// than prompt (Save-As folded into Save when no location exists).
    pub fn can_save_quickly(&self) -> bool {
        self.has_location
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_location(&self) -> bool {
        self.has_location
    }

    pub fn source(&self) -> &LoadSource {
        &self.source
    }

    pub fn save_paths(&self) -> &SavePaths {
        &self.save_paths
    }
}
