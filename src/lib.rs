//! # Introduction
//!
//! rvtty is a terminal workbench for a RISC-V processor simulator: an
//! editor, a processor view, a cache view, a memory view, and an I/O view,
//! coordinated over one shared program and one shared execution backend.
//! The heart of the crate is the session coordinator, which owns the active
//! panel, the document save-state machine, and the event links that keep
//! the independently implemented panels consistent.
//!
//! ## Event flow
//!
//! ```text
//! keys/menus ─┐                       ┌─> panels (via registered links)
//!             ├─> EventQueue ─> SessionCoordinator ─> DocumentState
//! backend ────┘                       └─> StatusAggregator
//! ```
//!
//! 1. [`session`]: the coordinator, panel registry, document state machine,
//!    event bus, and status channels.
//! 2. [`backend`]: the execution-backend surface, its event proxy, and the
//!    system I/O layer.
//! 3. [`panels`]: concrete implementations of the five panels.
//! 4. [`assets`]: bundled example programs and scoped ELF materialization.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod assets;
pub mod backend;
pub mod panels;
pub mod session;
pub mod ui;
