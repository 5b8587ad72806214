use std::io::{Read, Seek};

use super::{MapObject, NodeHeader, NodeKind};
use crate::{
    binaries::BinaryData,
    consts::MIN_FACE_SIZE,
    error::DecodeError,
    loader::Loader,
    structs::Face,
    view::View,
};

/// A convex brush.
#[derive(Clone, Debug, PartialEq)]
pub struct Solid {
    header: NodeHeader,
    faces: Vec<Face>,
}

impl Solid {
    pub fn faces(&self) -> View<'_, Face> {
        View::new(&self.faces)
    }

    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }
}

impl MapObject for Solid {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Solid
    }
}

impl BinaryData for Solid {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.log_begin("solid", &[]);
        let (header, _) = NodeHeader::read(loader, NodeKind::Solid)?;

        let n_faces = u32::read(loader)?;
        loader.log_begin("faces", &[("count", &n_faces)]);
        let faces = Face::read_list(loader, n_faces, MIN_FACE_SIZE)?;
        loader.log_end();
        loader.log_end();

        Ok(Self { header, faces })
    }
}
