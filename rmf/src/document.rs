use std::{
    collections::HashMap,
    io::{Read, Seek},
};

use crate::{
    binaries::BinaryData,
    consts::{FILE_MAGIC, VISGROUP_SIZE},
    error::{DecodeError, Diagnostic},
    loader::Loader,
    object::{peek_kind, unexpected, MapNode, MapObject, NodeKind, World},
    structs::{DocInfo, Visgroup},
    view::View,
};

/// A fully decoded map.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    version: f32,
    visgroups: Vec<Visgroup>,
    visgroup_index: HashMap<u32, usize, ahash::RandomState>,
    world: World,
    doc_info: DocInfo,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Format version from the file header, e.g. `2.2`.
    pub fn version(&self) -> f32 {
        self.version
    }

    pub fn worldspawn(&self) -> &World {
        &self.world
    }

    pub fn visgroups(&self) -> View<'_, Visgroup> {
        View::new(&self.visgroups)
    }

    pub fn n_visgroups(&self) -> usize {
        self.visgroups.len()
    }

    /// Looks a visgroup up by id. When ids repeat the first one wins.
    pub fn visgroup(&self, id: u32) -> Option<&Visgroup> {
        self.visgroup_index.get(&id).map(|&i| &self.visgroups[i])
    }

    /// Visgroup of `node`, if its id names one.
    pub fn visgroup_of(&self, node: &impl MapObject) -> Option<&Visgroup> {
        self.visgroup(node.visgroup_id())
    }

    pub fn doc_info(&self) -> &DocInfo {
        &self.doc_info
    }

    /// Findings that did not stop the decode.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Every object below the world, depth first in file order.
    pub fn walk<'a, F: FnMut(&'a MapNode, usize)>(&'a self, visit: &mut F) {
        self.world.walk(visit)
    }
}

impl BinaryData for Document {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let version = f32::read(loader)?;
        loader.set_version(version);

        let offset = loader.offset();
        let magic = loader.read(FILE_MAGIC.len())?;
        if magic != FILE_MAGIC {
            return Err(DecodeError::MalformedHeader {
                offset,
                expected: FILE_MAGIC,
                found: magic,
            });
        }
        log::debug!("reading rmf version {version}");
        loader.log_begin("rmf", &[("version", &version)]);

        let n_visgroups = u32::read(loader)?;
        loader.log_begin("visgroups", &[("count", &n_visgroups)]);
        let visgroups = Visgroup::read_list(loader, n_visgroups, VISGROUP_SIZE)?;
        loader.log_end();

        let mut visgroup_index =
            HashMap::with_capacity_and_hasher(visgroups.len(), ahash::RandomState::new());
        for (i, visgroup) in visgroups.iter().enumerate() {
            visgroup_index.entry(visgroup.id).or_insert(i);
        }
        if visgroup_index.len() != visgroups.len() {
            log::warn!("visgroup ids are not unique");
        }

        let offset = loader.offset();
        let (kind, tag) = peek_kind(loader)?;
        if kind != NodeKind::World {
            return Err(unexpected(offset, &tag, &[NodeKind::World]));
        }
        loader.enter()?;
        let world = World::read(loader)?;
        loader.leave();

        let doc_info = DocInfo::read(loader)?;

        let trailing = loader.remaining();
        if trailing > 0 {
            log::warn!("{trailing} trailing bytes after docinfo");
            loader.log_oneline("trailing", None, &[("bytes", &trailing)]);
        }
        loader.log_end();

        let diagnostics = loader.take_diagnostics();
        log::debug!(
            "read {} visgroups, {} top level objects, {} cameras",
            visgroups.len(),
            world.n_children(),
            doc_info.n_cameras()
        );

        Ok(Self {
            version,
            visgroups,
            visgroup_index,
            world,
            doc_info,
            diagnostics,
        })
    }
}
