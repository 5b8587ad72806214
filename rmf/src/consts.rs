use num_derive::FromPrimitive;

/// Follows the version float at the start of every file.
pub const FILE_MAGIC: &[u8] = b"RMF";
/// Opens the trailing camera block.
pub const DOCINFO_MAGIC: &[u8] = b"DOCINFO\0";

pub const TAG_WORLD: &[u8] = b"CMapWorld";
pub const TAG_SOLID: &[u8] = b"CMapSolid";
pub const TAG_ENTITY: &[u8] = b"CMapEntity";
pub const TAG_GROUP: &[u8] = b"CMapGroup";

pub const VISGROUP_NAME_LENGTH: usize = 128;
pub const PATH_NAME_LENGTH: usize = 128;
pub const PATH_NODE_NAME_LENGTH: usize = 128;

// texture name slot widths, chosen by format version
pub const TEXTURE_NAME_LENGTH: usize = 256;
pub const TEXTURE_NAME_LENGTH_OLD: usize = 36;

/// Above this version faces use the wide texture slot and the long trailing pad.
pub const WIDE_FACE_VERSION: f32 = 1.6;
/// From this version faces store their texture axes.
pub const FACE_AXES_VERSION: f32 = 2.2;

pub const FACE_PAD: usize = 16;
pub const FACE_PAD_OLD: usize = 4;

/// Docinfo version written by every known editor build.
pub const DOCINFO_VERSION: f32 = 0.2;

// smallest encodings, used to bound list preallocation
pub const MIN_NODE_SIZE: usize = 2 + 4 + 3 + 4;
pub const MIN_KEYVALUE_SIZE: usize = 4;
pub const VISGROUP_SIZE: usize = VISGROUP_NAME_LENGTH + 3 + 1 + 4 + 1 + 3;
pub const CAMERA_SIZE: usize = 24;
pub const MIN_FACE_SIZE: usize = TEXTURE_NAME_LENGTH_OLD + 4 + 4 * 5 + FACE_PAD_OLD + 4 + 36;
pub const MIN_PATH_NODE_SIZE: usize = 12 + 4 + PATH_NODE_NAME_LENGTH + 4;
pub const MIN_PATH_SIZE: usize = PATH_NAME_LENGTH * 2 + 4 + 4;

/// How an entity travels along a [`crate::Path`].
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum PathType {
    /// First to last, then stop.
    OneWay = 0,
    /// First to last, then teleport back to the first.
    Circular = 1,
    /// First to last, then reverse back to the first.
    PingPong = 2,
}
