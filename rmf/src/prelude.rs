pub use crate::config::{LoadOptions, UnknownNodePolicy};
pub use crate::consts::PathType;
pub use crate::document::Document;
pub use crate::error::{DecodeError, Diagnostic};
pub use crate::object::{Entity, EntityData, Group, MapNode, MapObject, NodeKind, Solid, World};
pub use crate::structs::{Camera, DocInfo, Face, KeyValue, Path, PathNode, Visgroup};
pub use crate::types::{Color, FixedName};
