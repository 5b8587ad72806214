//! Reader for Valve Hammer `.rmf` maps.
//!
//! ```no_run
//! use rmf::prelude::*;
//!
//! let (doc, _) = rmf::load_file("maps/c1a0.rmf", LoadOptions::default())?;
//! for node in doc.worldspawn().children() {
//!     println!("{:?} in visgroup {}", node.kind(), node.visgroup_id());
//! }
//! # Ok::<(), rmf::DecodeError>(())
//! ```

pub mod binaries;
pub mod config;
pub mod consts;
pub mod document;
pub mod error;
pub mod loader;
pub mod object;
pub mod prelude;
pub mod structs;
pub mod trace;
pub mod types;
pub mod view;

#[cfg(test)]
mod fixtures;

use std::{
    fs::File,
    io::{Cursor, Read, Seek},
    path,
};

pub use binaries::BinaryData;
pub use config::{ConfigError, LoadOptions, UnknownNodePolicy};
pub use consts::PathType;
pub use document::Document;
pub use error::{DecodeError, Diagnostic};
pub use loader::Loader;
pub use object::{
    Entity, EntityData, Group, MapNode, MapObject, NodeKind, Solid, UnknownNode, World,
};
pub use structs::{Camera, DocInfo, Face, KeyValue, Path, PathNode, Visgroup};
pub use trace::Trace;
pub use types::{Color, FixedName};
pub use view::View;

/// Decodes a whole document with default options.
pub fn load<R: Read + Seek>(reader: R) -> Result<Document, DecodeError> {
    load_with(reader, LoadOptions::default()).map(|(doc, _)| doc)
}

/// Decodes a whole document, returning the trace as well when `options.trace` is set.
pub fn load_with<R: Read + Seek>(
    reader: R,
    options: LoadOptions,
) -> Result<(Document, Option<Trace>), DecodeError> {
    let mut loader = Loader::new(reader, options)?;
    let doc = Document::read(&mut loader)?;
    Ok((doc, loader.take_trace()))
}

pub fn load_bytes(bytes: &[u8]) -> Result<Document, DecodeError> {
    load(Cursor::new(bytes))
}

pub fn load_file(
    path: impl AsRef<path::Path>,
    options: LoadOptions,
) -> Result<(Document, Option<Trace>), DecodeError> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let file = File::open(path).map_err(|source| DecodeError::Io { offset: 0, source })?;
    load_with(file, options)
}
