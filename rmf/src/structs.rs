use std::io::{Read, Seek};

use glam::Vec3;
use num_traits::FromPrimitive;

use crate::{
    binaries::BinaryData,
    consts::*,
    error::DecodeError,
    loader::Loader,
    types::{fmt_vec3, Color, FixedName},
    view::View,
};

/// A named group of objects which can be hidden in the editor.
#[derive(Clone, Debug, PartialEq)]
pub struct Visgroup {
    pub name: FixedName,
    pub color: Color,
    pub id: u32,
    /// Raw visibility byte as stored.
    pub flag: u8,
}

impl Visgroup {
    /// Visibility as the editor format interprets it: a zero flag byte means shown.
    pub fn visible(&self) -> bool {
        self.flag == 0
    }
}

impl BinaryData for Visgroup {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let name = loader.read_name(VISGROUP_NAME_LENGTH)?;
        let color = Color::read(loader)?;
        loader.skip(1)?;
        let id = u32::read(loader)?;
        let flag = loader.read_u8()?;
        loader.skip(3)?;

        loader.log_oneline("visgroup", None, &[("name", &name), ("id", &id)]);

        Ok(Self {
            name,
            color,
            id,
            flag,
        })
    }
}

/// A key-value pair, both sides stored as counted strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl BinaryData for KeyValue {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let key = loader.read_counted_string()?;
        let value = loader.read_counted_string()?;

        loader.log_oneline("keyvalue", Some(&value), &[("key", &key)]);

        Ok(Self { key, value })
    }
}

pub(crate) fn read_keyvalues<R: Read + Seek>(
    loader: &mut Loader<R>,
) -> Result<Vec<KeyValue>, DecodeError> {
    let count = u32::read(loader)?;
    loader.log_begin("keyvalues", &[("count", &count)]);
    let keyvalues = KeyValue::read_list(loader, count, MIN_KEYVALUE_SIZE)?;
    loader.log_end();
    Ok(keyvalues)
}

/// A flat polygon bounding a [`crate::Solid`], with its texture projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub texture_name: FixedName,
    /// Texture right axis. Only stored from format 2.2 on, `None` before that.
    pub right_axis: Option<Vec3>,
    pub shift_x: f32,
    /// Texture down axis. Only stored from format 2.2 on, `None` before that.
    pub down_axis: Option<Vec3>,
    pub shift_y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    vertices: Vec<Vec3>,
    /// Three points defining the face plane.
    pub plane_points: [Vec3; 3],
}

impl Face {
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }
}

impl BinaryData for Face {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let version = loader.version();
        let wide = version > WIDE_FACE_VERSION;
        let has_axes = version >= FACE_AXES_VERSION;

        let texture_name = loader.read_name(if wide {
            TEXTURE_NAME_LENGTH
        } else {
            TEXTURE_NAME_LENGTH_OLD
        })?;
        loader.skip(4)?;

        let right_axis = has_axes.then(|| Vec3::read(loader)).transpose()?;
        let shift_x = f32::read(loader)?;
        let down_axis = has_axes.then(|| Vec3::read(loader)).transpose()?;
        let shift_y = f32::read(loader)?;
        let rotation = f32::read(loader)?;
        let scale_x = f32::read(loader)?;
        let scale_y = f32::read(loader)?;
        loader.skip(if wide { FACE_PAD } else { FACE_PAD_OLD })?;

        let n_vertices = u32::read(loader)?;
        loader.log_oneline(
            "face",
            None,
            &[("texture", &texture_name), ("n_vertices", &n_vertices)],
        );
        let vertices = loader.read_vectors(n_vertices)?;
        let plane_points = [
            Vec3::read(loader)?,
            Vec3::read(loader)?,
            Vec3::read(loader)?,
        ];

        Ok(Self {
            texture_name,
            right_axis,
            shift_x,
            down_axis,
            shift_y,
            rotation,
            scale_x,
            scale_y,
            vertices,
            plane_points,
        })
    }
}

/// One stop along a [`Path`].
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub position: Vec3,
    pub index: u32,
    /// Display name used instead of the generated one, empty when unset.
    pub name_override: FixedName,
    keyvalues: Vec<KeyValue>,
}

impl PathNode {
    pub fn keyvalues(&self) -> View<'_, KeyValue> {
        View::new(&self.keyvalues)
    }

    pub fn n_keyvalues(&self) -> usize {
        self.keyvalues.len()
    }
}

impl BinaryData for PathNode {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let position = Vec3::read(loader)?;
        let index = u32::read(loader)?;
        let name_override = loader.read_name(PATH_NODE_NAME_LENGTH)?;

        loader.log_begin(
            "pathnode",
            &[("index", &index), ("position", &fmt_vec3(position))],
        );
        let keyvalues = read_keyvalues(loader)?;
        loader.log_end();

        Ok(Self {
            position,
            index,
            name_override,
            keyvalues,
        })
    }
}

/// A path placed with the editor's path tool.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub name: FixedName,
    /// Usually `path_corner` or `path_track`.
    pub classname: FixedName,
    /// Raw path type, see [`Path::kind`].
    pub path_type: u32,
    nodes: Vec<PathNode>,
}

impl Path {
    /// `None` for values outside the known set.
    pub fn kind(&self) -> Option<PathType> {
        PathType::from_u32(self.path_type)
    }

    pub fn nodes(&self) -> View<'_, PathNode> {
        View::new(&self.nodes)
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

impl BinaryData for Path {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let name = loader.read_name(PATH_NAME_LENGTH)?;
        let classname = loader.read_name(PATH_NAME_LENGTH)?;
        let path_type = u32::read(loader)?;
        let n_nodes = u32::read(loader)?;

        loader.log_begin(
            "path",
            &[
                ("name", &name),
                ("classname", &classname),
                ("type", &path_type),
                ("count", &n_nodes),
            ],
        );
        let nodes = PathNode::read_list(loader, n_nodes, MIN_PATH_NODE_SIZE)?;
        loader.log_end();

        Ok(Self {
            name,
            classname,
            path_type,
            nodes,
        })
    }
}

/// A saved viewport position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Camera {
    pub eye_position: Vec3,
    pub lookat_position: Vec3,
}

impl BinaryData for Camera {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let eye_position = Vec3::read(loader)?;
        let lookat_position = Vec3::read(loader)?;

        loader.log_oneline(
            "camera",
            None,
            &[
                ("eye", &fmt_vec3(eye_position)),
                ("lookat", &fmt_vec3(lookat_position)),
            ],
        );

        Ok(Self {
            eye_position,
            lookat_position,
        })
    }
}

/// Trailing block holding the saved cameras.
#[derive(Clone, Debug, PartialEq)]
pub struct DocInfo {
    version: f32,
    active_camera: u32,
    cameras: Vec<Camera>,
}

impl DocInfo {
    pub fn version(&self) -> f32 {
        self.version
    }

    /// Index into the camera list. Not checked against it.
    pub fn active_camera(&self) -> u32 {
        self.active_camera
    }

    pub fn cameras(&self) -> View<'_, Camera> {
        View::new(&self.cameras)
    }

    pub fn n_cameras(&self) -> usize {
        self.cameras.len()
    }

    /// The camera `active_camera` points at, if it is in range.
    pub fn active(&self) -> Option<&Camera> {
        self.cameras.get(self.active_camera as usize)
    }
}

impl BinaryData for DocInfo {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let offset = loader.offset();
        let marker = loader.read(DOCINFO_MAGIC.len())?;
        if marker != DOCINFO_MAGIC {
            return Err(DecodeError::MalformedHeader {
                offset,
                expected: DOCINFO_MAGIC,
                found: marker,
            });
        }

        let version = f32::read(loader)?;
        if version != DOCINFO_VERSION {
            log::warn!("unexpected docinfo version {version} at {offset:#x}");
        }
        let active_camera = u32::read(loader)?;
        loader.log_begin(
            "docinfo",
            &[("version", &version), ("active_camera", &active_camera)],
        );

        let n_cameras = u32::read(loader)?;
        loader.log_begin("cameras", &[("count", &n_cameras)]);
        let cameras = Camera::read_list(loader, n_cameras, CAMERA_SIZE)?;
        loader.log_end();
        loader.log_end();

        Ok(Self {
            version,
            active_camera,
            cameras,
        })
    }
}
