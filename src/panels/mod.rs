//! Concrete panel implementations
//!
//! The five panels composing the workbench, each behind the capability
//! traits in [`crate::session::panel`]:
//! - [`editor`]: program text buffer, external loads, save artifacts
//! - [`processor`]: execution log and run state
//! - [`cache`]: cache view emitting focus-address changes
//! - [`memory`]: memory view re-centered by the cache panel
//! - [`io`]: program output from the system I/O layer
//!
//! Panels never talk to each other directly; cross-panel effects flow
//! through links the coordinator registers on its event bus.

pub mod cache;
pub mod editor;
pub mod io;
pub mod memory;
pub mod processor;

pub use cache::CachePanel;
pub use editor::EditorPanel;
pub use io::IoPanel;
pub use memory::MemoryPanel;
pub use processor::ProcessorPanel;
