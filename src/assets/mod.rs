//! Bundled example programs
//!
//! The examples menu enumerates assets embedded in the binary, grouped by
//! source kind. Assembly and C assets load straight from memory; precompiled
//! ELF assets must be materialized to a real filesystem path first, because
//! the program loader reads files. Materialization is a scoped resource: the
//! temporary file is deleted on every exit path, including load failure,
//! when the [`tempfile::NamedTempFile`] handle drops.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::session::panel::SourceKind;
use crate::session::SessionError;

/// One embedded example program.
pub struct ExampleAsset {
    pub name: &'static str,
    pub kind: SourceKind,
    pub bytes: &'static [u8],
}

/// All bundled examples, grouped by kind in menu order.
pub const EXAMPLES: &[ExampleAsset] = &[
    ExampleAsset {
        name: "fib.s",
        kind: SourceKind::Assembly,
        bytes: include_bytes!("../../demos/fib.s"),
    },
    ExampleAsset {
        name: "hello.s",
        kind: SourceKind::Assembly,
        bytes: include_bytes!("../../demos/hello.s"),
    },
    ExampleAsset {
        name: "counter.c",
        kind: SourceKind::C,
        bytes: include_bytes!("../../demos/counter.c"),
    },
    ExampleAsset {
        name: "fib.elf",
        kind: SourceKind::ExternalElf,
        bytes: include_bytes!("../../demos/fib.elf"),
    },
];

/// Examples of one kind, in menu order.
pub fn by_kind(kind: SourceKind) -> impl Iterator<Item = &'static ExampleAsset> {
    EXAMPLES.iter().filter(move |a| a.kind == kind)
}

pub fn find(name: &str) -> Option<&'static ExampleAsset> {
    EXAMPLES.iter().find(|a| a.name == name)
}

/// Materialize a bundled asset to a temporary file the loader can read.
///
/// The file is removed when the returned handle drops, whether or not the
/// load that follows succeeds.
pub fn materialize(asset: &ExampleAsset) -> Result<NamedTempFile, SessionError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("rvtty-")
        .suffix(".elf")
        .tempfile()
        .map_err(|e| SessionError::ResourceUnavailable {
            what: format!("could not create temporary file for {}", asset.name),
            source: e,
        })?;
    tmp.write_all(asset.bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| SessionError::ResourceUnavailable {
            what: format!("could not write temporary copy of {}", asset.name),
            source: e,
        })?;
    Ok(tmp)
}
