use std::io::{Read, Seek};

use super::{EntityData, MapObject, NodeHeader, NodeKind};
use crate::{
    binaries::BinaryData,
    consts::MIN_PATH_SIZE,
    error::DecodeError,
    loader::Loader,
    structs::Path,
    view::View,
};

/// The root object. Holds the worldspawn entity properties and every path in the map.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    header: NodeHeader,
    entity_data: EntityData,
    paths: Vec<Path>,
}

impl World {
    pub fn entity_data(&self) -> &EntityData {
        &self.entity_data
    }

    pub fn paths(&self) -> View<'_, Path> {
        View::new(&self.paths)
    }

    pub fn n_paths(&self) -> usize {
        self.paths.len()
    }
}

impl MapObject for World {
    fn header(&self) -> &NodeHeader {
        &self.header
    }

    fn kind(&self) -> NodeKind {
        NodeKind::World
    }
}

impl BinaryData for World {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.log_begin("worldspawn", &[]);
        let (header, _) = NodeHeader::read(loader, NodeKind::World)?;
        let entity_data = EntityData::read(loader)?;

        let n_paths = u32::read(loader)?;
        loader.log_begin("paths", &[("count", &n_paths)]);
        let paths = Path::read_list(loader, n_paths, MIN_PATH_SIZE)?;
        loader.log_end();
        loader.log_end();

        Ok(Self {
            header,
            entity_data,
            paths,
        })
    }
}
