use std::io::{Read, Seek};

use glam::Vec3;

use super::{EntityData, MapObject, NodeHeader, NodeKind};
use crate::{
    binaries::BinaryData,
    error::DecodeError,
    loader::Loader,
    types::fmt_vec3,
};

/// A point or brush entity. Brush entities own their solids as children.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    header: NodeHeader,
    entity_data: EntityData,
    origin: Vec3,
}

impl Entity {
    pub fn entity_data(&self) -> &EntityData {
        &self.entity_data
    }

    pub fn classname(&self) -> &str {
        self.entity_data.classname()
    }

    /// Placement of point entities. Brush entities usually leave it at zero.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}

impl MapObject for Entity {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Entity
    }
}

impl BinaryData for Entity {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.log_begin("entity", &[]);
        let (header, _) = NodeHeader::read(loader, NodeKind::Entity)?;
        let entity_data = EntityData::read(loader)?;
        loader.skip(2)?;
        let origin = Vec3::read(loader)?;
        loader.skip(4)?;
        loader.log_oneline("origin", Some(&fmt_vec3(origin)), &[]);
        loader.log_end();

        Ok(Self {
            header,
            entity_data,
            origin,
        })
    }
}
