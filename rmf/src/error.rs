use std::io;

use thiserror::Error;

use crate::object::NodeKind;

/// Anything that aborts a decode. No partial [`crate::Document`] survives one of these.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("truncated at {offset:#x}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: u64,
        needed: u64,
        available: u64,
    },
    #[error("seek by {relative} from {offset:#x} leaves the source (length {len})")]
    OutOfRange { offset: u64, relative: i64, len: u64 },
    #[error("counted string at {offset:#x} has a zero length byte")]
    InvalidLength { offset: u64 },
    #[error("counted string at {offset:#x} is not NUL terminated")]
    NotNulTerminated { offset: u64 },
    #[error("object type {tag:?} ({found:?}) at {offset:#x}, expected one of {expected:?}")]
    UnexpectedTag {
        offset: u64,
        tag: String,
        found: NodeKind,
        expected: &'static [NodeKind],
    },
    #[error("malformed header at {offset:#x}: expected {expected:?}, found {found:?}")]
    MalformedHeader {
        offset: u64,
        expected: &'static [u8],
        found: Vec<u8>,
    },
    #[error("object tree at {offset:#x} is nested deeper than {max_depth}")]
    DepthExceeded { offset: u64, max_depth: usize },
    #[error("io error at {offset:#x}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    /// Byte offset at which the problem was detected.
    pub fn offset(&self) -> u64 {
        match self {
            DecodeError::Truncated { offset, .. }
            | DecodeError::OutOfRange { offset, .. }
            | DecodeError::InvalidLength { offset }
            | DecodeError::NotNulTerminated { offset }
            | DecodeError::UnexpectedTag { offset, .. }
            | DecodeError::MalformedHeader { offset, .. }
            | DecodeError::DepthExceeded { offset, .. }
            | DecodeError::Io { offset, .. } => *offset,
        }
    }
}

/// Recoverable findings recorded on the document instead of aborting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// An object whose type string matched none of the known tags.
    /// Only produced when unknown objects are kept, see [`crate::UnknownNodePolicy`].
    UnknownTag { offset: u64, tag: String },
}

impl Diagnostic {
    pub fn offset(&self) -> u64 {
        match self {
            Diagnostic::UnknownTag { offset, .. } => *offset,
        }
    }
}
