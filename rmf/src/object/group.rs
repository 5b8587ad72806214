use std::io::{Read, Seek};

use super::{MapObject, NodeHeader, NodeKind};
use crate::{binaries::BinaryData, error::DecodeError, loader::Loader};

/// Groups objects together. Stores nothing beyond the common header.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    header: NodeHeader,
}

impl MapObject for Group {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Group
    }
}

impl BinaryData for Group {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.log_begin("group", &[]);
        let (header, _) = NodeHeader::read(loader, NodeKind::Group)?;
        loader.log_end();
        Ok(Self { header })
    }
}

/// An object whose type string is not known. Only the common header and the
/// children are decoded; anything the real type stores after them is not.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownNode {
    tag: String,
    header: NodeHeader,
}

impl UnknownNode {
    /// The type string as found in the file.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl MapObject for UnknownNode {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Unknown
    }
}

impl BinaryData for UnknownNode {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.log_begin("unknown", &[]);
        let (header, tag) = NodeHeader::read(loader, NodeKind::Unknown)?;
        loader.log_end();
        Ok(Self { tag, header })
    }
}
