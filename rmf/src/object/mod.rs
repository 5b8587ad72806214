pub mod entity;
pub mod entity_data;
pub mod group;
pub mod solid;
pub mod world;

use std::io::{Read, Seek};

pub use entity::Entity;
pub use entity_data::EntityData;
pub use group::{Group, UnknownNode};
pub use solid::Solid;
pub use world::World;

use crate::{
    binaries::BinaryData,
    config::UnknownNodePolicy,
    consts::{MIN_NODE_SIZE, TAG_ENTITY, TAG_GROUP, TAG_SOLID, TAG_WORLD},
    error::{DecodeError, Diagnostic},
    loader::Loader,
    types::Color,
    view::View,
};

// The object tree
//
// Every object starts with the same header: a counted type string naming the
// editor class (`CMapWorld`, `CMapSolid`, ...), the visgroup id, the editor color
// and a child count followed by the children themselves. Whatever a kind stores
// beyond that comes after its children. The type string is the only thing that
// says how to decode the rest, so it is peeked first and read again as part of
// the header.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    World,
    Solid,
    Entity,
    Group,
    Unknown,
}

impl NodeKind {
    pub const KNOWN: &'static [NodeKind] = &[
        NodeKind::World,
        NodeKind::Solid,
        NodeKind::Entity,
        NodeKind::Group,
    ];

    /// Case sensitive match against the known type strings. The tag ends at its
    /// first NUL, so padded tags like `CMapWorld\0\0` still resolve.
    pub fn from_tag(tag: &[u8]) -> Self {
        let end = tag.iter().position(|&b| b == 0).unwrap_or(tag.len());
        match &tag[..end] {
            TAG_WORLD => NodeKind::World,
            TAG_SOLID => NodeKind::Solid,
            TAG_ENTITY => NodeKind::Entity,
            TAG_GROUP => NodeKind::Group,
            _ => NodeKind::Unknown,
        }
    }

    pub fn tag(self) -> Option<&'static [u8]> {
        match self {
            NodeKind::World => Some(TAG_WORLD),
            NodeKind::Solid => Some(TAG_SOLID),
            NodeKind::Entity => Some(TAG_ENTITY),
            NodeKind::Group => Some(TAG_GROUP),
            NodeKind::Unknown => None,
        }
    }

    fn as_slice(self) -> &'static [NodeKind] {
        match self {
            NodeKind::World => &[NodeKind::World],
            NodeKind::Solid => &[NodeKind::Solid],
            NodeKind::Entity => &[NodeKind::Entity],
            NodeKind::Group => &[NodeKind::Group],
            NodeKind::Unknown => &[NodeKind::Unknown],
        }
    }
}

/// Peeks the type string of the object at the current offset.
///
/// The offset is left where it was. Returns the resolved kind and the raw type string.
pub fn peek_kind<R: Read + Seek>(loader: &mut Loader<R>) -> Result<(NodeKind, Vec<u8>), DecodeError> {
    let start = loader.offset();
    let tag = loader.read_counted_bytes()?;
    let consumed = loader.offset() - start;
    loader.seek(-(consumed as i64))?;

    Ok((NodeKind::from_tag(&tag), tag))
}

pub(crate) fn unexpected(offset: u64, tag: &[u8], expected: &'static [NodeKind]) -> DecodeError {
    DecodeError::UnexpectedTag {
        offset,
        tag: String::from_utf8_lossy(tag).into_owned(),
        found: NodeKind::from_tag(tag),
        expected,
    }
}

/// Fields shared by every object kind.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeHeader {
    pub visgroup_id: u32,
    pub color: Color,
    children: Vec<MapNode>,
}

impl NodeHeader {
    pub fn children(&self) -> &[MapNode] {
        &self.children
    }

    /// Reads the header and all children, checking the type string resolves to `expected`.
    pub(crate) fn read<R: Read + Seek>(
        loader: &mut Loader<R>,
        expected: NodeKind,
    ) -> Result<(Self, String), DecodeError> {
        let offset = loader.offset();
        let tag = loader.read_counted_bytes()?;
        if NodeKind::from_tag(&tag) != expected {
            return Err(unexpected(offset, &tag, expected.as_slice()));
        }

        let visgroup_id = u32::read(loader)?;
        let color = Color::read(loader)?;
        let n_children = u32::read(loader)?;

        let children = if n_children > 0 {
            loader.log_begin("children", &[("count", &n_children)]);
            let children = MapNode::read_list(loader, n_children, MIN_NODE_SIZE)?;
            loader.log_end();
            children
        } else {
            Vec::new()
        };

        Ok((
            Self {
                visgroup_id,
                color,
                children,
            },
            String::from_utf8_lossy(&tag).into_owned(),
        ))
    }
}

/// Accessors every object kind shares through its [`NodeHeader`].
pub trait MapObject {
    fn header(&self) -> &NodeHeader;

    fn kind(&self) -> NodeKind;

    /// Id of the visgroup the object belongs to. May name no visgroup at all.
    fn visgroup_id(&self) -> u32 {
        self.header().visgroup_id
    }

    fn color(&self) -> Color {
        self.header().color
    }

    fn children(&self) -> View<'_, MapNode> {
        View::new(&self.header().children)
    }

    fn n_children(&self) -> usize {
        self.header().children.len()
    }

    /// Visits every descendant depth first, parents before children, in file order.
    /// Depth 1 is a direct child.
    fn walk<'a, F: FnMut(&'a MapNode, usize)>(&'a self, visit: &mut F)
    where
        Self: Sized,
    {
        walk_children(self.header(), 1, visit);
    }
}

fn walk_children<'a, F: FnMut(&'a MapNode, usize)>(header: &'a NodeHeader, depth: usize, visit: &mut F) {
    for child in &header.children {
        visit(child, depth);
        walk_children(child.header(), depth + 1, visit);
    }
}

/// One object of the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum MapNode {
    World(World),
    Solid(Solid),
    Entity(Entity),
    Group(Group),
    Unknown(UnknownNode),
}

impl MapNode {
    pub fn as_world(&self) -> Option<&World> {
        match self {
            MapNode::World(world) => Some(world),
            _ => None,
        }
    }

    pub fn as_solid(&self) -> Option<&Solid> {
        match self {
            MapNode::Solid(solid) => Some(solid),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            MapNode::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            MapNode::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Classname, spawnflags and keyvalues of worlds and entities.
    pub fn entity_data(&self) -> Option<&EntityData> {
        match self {
            MapNode::World(world) => Some(world.entity_data()),
            MapNode::Entity(entity) => Some(entity.entity_data()),
            _ => None,
        }
    }
}

impl MapObject for MapNode {
    fn header(&self) -> &NodeHeader {
        match self {
            MapNode::World(n) => n.header(),
            MapNode::Solid(n) => n.header(),
            MapNode::Entity(n) => n.header(),
            MapNode::Group(n) => n.header(),
            MapNode::Unknown(n) => n.header(),
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            MapNode::World(_) => NodeKind::World,
            MapNode::Solid(_) => NodeKind::Solid,
            MapNode::Entity(_) => NodeKind::Entity,
            MapNode::Group(_) => NodeKind::Group,
            MapNode::Unknown(_) => NodeKind::Unknown,
        }
    }
}

impl BinaryData for MapNode {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.enter()?;
        let node = read_node(loader)?;
        loader.leave();
        Ok(node)
    }
}

fn read_node<R: Read + Seek>(loader: &mut Loader<R>) -> Result<MapNode, DecodeError> {
    let offset = loader.offset();
    let (kind, tag) = peek_kind(loader)?;

    match kind {
        NodeKind::World => World::read(loader).map(MapNode::World),
        NodeKind::Solid => Solid::read(loader).map(MapNode::Solid),
        NodeKind::Entity => Entity::read(loader).map(MapNode::Entity),
        NodeKind::Group => Group::read(loader).map(MapNode::Group),
        NodeKind::Unknown => match loader.options().unknown_nodes {
            UnknownNodePolicy::Reject => Err(unexpected(offset, &tag, NodeKind::KNOWN)),
            UnknownNodePolicy::Keep => {
                log::warn!(
                    "keeping object of unknown type {:?} at {offset:#x}",
                    String::from_utf8_lossy(&tag)
                );
                let node = UnknownNode::read(loader)?;
                loader.diagnose(Diagnostic::UnknownTag {
                    offset,
                    tag: node.tag().to_owned(),
                });
                Ok(MapNode::Unknown(node))
            }
        },
    }
}
