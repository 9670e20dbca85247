//! Execution backend facade
//!
//! The simulator proper (instruction decode/execute, pipeline model) is an
//! external collaborator; this module defines its narrow surface and the
//! plumbing the coordinator consumes:
//! - [`proxy`]: [`proxy::ExecutionBackendProxy`], the single multiplexed
//!   event feed over the engine and the system I/O layer
//! - [`io`]: [`io::SystemIo`], the syscall print sink
//! - [`handler`]: [`handler::ProcessorHandler`], a minimal in-process backend
//!   used by the binary and by tests

pub mod handler;
pub mod io;
pub mod proxy;

pub use handler::ProcessorHandler;
pub use io::SystemIo;
pub use proxy::{ExecutionBackend, ExecutionBackendProxy};

/// A program handed to the backend: assembly source plus, when derivable,
/// its raw binary image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub source: String,
    pub binary: Option<Vec<u8>>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.binary.is_none()
    }
}
