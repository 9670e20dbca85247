//! Session coordination for the workbench
//!
//! This module provides the control core that ties the independent panels,
//! the execution backend, and the document state together:
//! - [`panel`]: panel identities, capability traits, and the [`panel::PanelRegistry`]
//! - [`document`]: the clean/dirty × location state machine behind Save/Save As
//! - [`events`]: the session event vocabulary, the shared event queue, and the
//!   subscriber bus
//! - [`status`]: named status channels fed by the execution and I/O layers
//! - [`coordinator`]: the [`coordinator::SessionCoordinator`] orchestrating all
//!   of the above
//!
//! # Control model
//!
//! Everything here runs on the one control thread. Panels and the backend
//! never call each other directly; they push named events onto a shared
//! [`events::EventQueue`], and the coordinator drains that queue, updates the
//! state it owns, and relays events to whichever panels registered interest.

pub mod coordinator;
pub mod document;
pub mod events;
pub mod panel;
pub mod status;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// Shared single-threaded handle used for panels and the backend.
pub type Shared<T> = Rc<RefCell<T>>;

/// Errors surfaced by session operations.
///
/// User cancellation is deliberately not represented here: cancelling a
/// modal prompt is a normal workflow outcome, reported as
/// [`coordinator::Outcome::Cancelled`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The panel registry was used in a way only valid during startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required resource (file, temporary artifact) could not be opened.
    #[error("{what}")]
    ResourceUnavailable {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub use coordinator::{ConfirmChoice, DialogService, Outcome, SessionCoordinator};
pub use document::{DocumentState, LoadSource, SavePaths};
pub use events::{EventBus, EventKind, EventQueue, SessionEvent};
pub use panel::{
    AddressViewPanel, EditableDocumentPanel, ExecutionControlPanel, FileSource, LoadFileParams,
    OutputSinkPanel, Panel, PanelKind, PanelRegistry, SourceKind,
};
pub use status::{StatusAggregator, StatusChannel};
