//! Editor panel: the program text buffer
//!
//! Holds the assembly/C source being edited, or the listing of a loaded ELF
//! image (in which case editing is disabled). Edits emit
//! `EditorStateChanged { dirty: true }` on the shared feed; the coordinator
//! owns the document state machine those events drive.

use std::fs;

use crate::session::events::{EventQueue, SessionEvent};
use crate::session::panel::{
    EditableDocumentPanel, FileSource, LoadFileParams, Panel, PanelKind, SourceKind,
};
use crate::session::SessionError;

pub struct EditorPanel {
    queue: EventQueue,
    text: String,
    /// Byte offset of the cursor within `text`.
    cursor: usize,
    /// Raw image of a loaded ELF; the only case where binary content is
    /// derivable.
    binary: Option<Vec<u8>>,
    /// False while an ELF listing is shown; the listing is not editable.
    enabled: bool,
    /// Line highlighted as the current execution position, if any.
    exec_highlight: Option<usize>,
    visible: bool,
}

impl EditorPanel {
    pub fn new(queue: EventQueue) -> Self {
        Self {
            queue,
            text: String::new(),
            cursor: 0,
            binary: None,
            enabled: true,
            exec_highlight: None,
            visible: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn exec_highlight(&self) -> Option<usize> {
        self.exec_highlight
    }

    /// Insert a character at the cursor. No-op while the editor is disabled.
    pub fn insert_char(&mut self, c: char) {
        if !self.enabled {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.queue
            .push(SessionEvent::EditorStateChanged { dirty: true });
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if !self.enabled || self.cursor == 0 {
            return;
        }
        let prev = self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        self.queue
            .push(SessionEvent::EditorStateChanged { dirty: true });
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                self.cursor = self.text[..self.cursor]
                    .char_indices()
                    .next_back()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
            }
        } else {
            for _ in 0..delta as usize {
                match self.text[self.cursor..].chars().next() {
                    Some(c) => self.cursor += c.len_utf8(),
                    None => break,
                }
            }
        }
    }

    fn set_text_content(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
        self.binary = None;
        self.enabled = true;
        self.exec_highlight = None;
    }

    fn set_binary_content(&mut self, name: &str, bytes: Vec<u8>) {
        let mut listing = format!("; {}: {} bytes, read-only listing\n", name, bytes.len());
        for (i, chunk) in bytes.chunks(4).enumerate().take(64) {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            listing.push_str(&format!(
                "{:08x}: {:08x}\n",
                i * 4,
                u32::from_le_bytes(word)
            ));
        }
        self.text = listing;
        self.cursor = 0;
        self.binary = Some(bytes);
        self.enabled = false;
        self.exec_highlight = None;
    }
}

impl Panel for EditorPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Editor
    }

    fn visibility_changed(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.refresh_exec_highlight();
        }
    }
}

impl EditableDocumentPanel for EditorPanel {
    fn load_external_file(&mut self, params: &LoadFileParams) -> Result<(), SessionError> {
        match params.kind {
            SourceKind::Assembly | SourceKind::C => {
                let text = match &params.source {
                    FileSource::Disk(path) => fs::read_to_string(path).map_err(|e| {
                        SessionError::ResourceUnavailable {
                            what: format!("could not read {}", path.display()),
                            source: e,
                        }
                    })?,
                    FileSource::Bundled { bytes, .. } => {
                        String::from_utf8_lossy(bytes).into_owned()
                    }
                };
                self.set_text_content(text);
            }
            SourceKind::ExternalElf => {
                // The ELF loader reads real files; bundled assets must be
                // materialized to a path before reaching this point.
                let (name, bytes) = match &params.source {
                    FileSource::Disk(path) => {
                        let bytes = fs::read(path).map_err(|e| SessionError::ResourceUnavailable {
                            what: format!("could not read {}", path.display()),
                            source: e,
                        })?;
                        (path.display().to_string(), bytes)
                    }
                    FileSource::Bundled { name, bytes } => (name.to_string(), bytes.to_vec()),
                };
                self.set_binary_content(&name, bytes);
            }
        }
        Ok(())
    }

    fn new_program(&mut self) {
        self.set_text_content(String::new());
    }

    fn assembly_text(&self) -> String {
        self.text.clone()
    }

    fn binary_data(&self) -> Option<Vec<u8>> {
        self.binary.clone()
    }

    fn is_editor_enabled(&self) -> bool {
        self.enabled
    }

    fn refresh_exec_highlight(&mut self) {
        // Highlight the entry point while a program is present and the
        // editor is showing editable source; stale highlights are dropped.
        self.exec_highlight = if self.enabled && !self.text.is_empty() {
            Some(0)
        } else {
            None
        };
    }
}
