//! Byte stream builder for tests.

use glam::{vec3, Vec3};

use crate::{
    consts::*,
    types::Color,
};

#[derive(Default)]
pub(crate) struct RmfWriter {
    bytes: Vec<u8>,
}

impl RmfWriter {
    pub const COLOR: Color = Color {
        r: 0,
        g: 200,
        b: 100,
    };
    pub const FACE_SHIFT_X: f32 = 8.0;
    pub const FACE_SHIFT_Y: f32 = -16.0;
    pub const FACE_ROTATION: f32 = 0.0;
    pub const FACE_SCALE: f32 = 0.25;
    pub const RIGHT_AXIS: Vec3 = Vec3::X;
    pub const DOWN_AXIS: Vec3 = Vec3::NEG_Z;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// A 64 unit square in the xy plane.
    pub fn square() -> Vec<Vec3> {
        vec![
            vec3(0.0, 0.0, 0.0),
            vec3(64.0, 0.0, 0.0),
            vec3(64.0, 64.0, 0.0),
            vec3(0.0, 64.0, 0.0),
        ]
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn vec3(&mut self, v: Vec3) -> &mut Self {
        self.f32(v.x).f32(v.y).f32(v.z)
    }

    pub fn color(&mut self, c: Color) -> &mut Self {
        self.raw(&[c.r, c.g, c.b])
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.bytes.resize(self.bytes.len() + n, 0);
        self
    }

    /// Length byte, text, NUL.
    pub fn counted(&mut self, s: &str) -> &mut Self {
        self.u8(s.len() as u8 + 1).raw(s.as_bytes()).u8(0)
    }

    /// `s` padded with NULs to a `width` byte slot.
    pub fn name(&mut self, s: &str, width: usize) -> &mut Self {
        assert!(s.len() < width);
        self.raw(s.as_bytes()).zeros(width - s.len())
    }

    pub fn file_header(&mut self, version: f32) -> &mut Self {
        self.f32(version).raw(FILE_MAGIC)
    }

    pub fn visgroup(&mut self, name: &str, id: u32, flag: u8) -> &mut Self {
        self.name(name, VISGROUP_NAME_LENGTH)
            .color(Self::COLOR)
            .zeros(1)
            .u32(id)
            .u8(flag)
            .zeros(3)
    }

    pub fn node_header(&mut self, tag: &str, visgroup_id: u32, n_children: u32) -> &mut Self {
        self.counted(tag)
            .u32(visgroup_id)
            .color(Self::COLOR)
            .u32(n_children)
    }

    /// Header of a world. Children, entity data and paths follow.
    pub fn world_header(&mut self, n_children: u32) -> &mut Self {
        self.node_header("CMapWorld", 0, n_children)
    }

    pub fn group(&mut self, n_children: u32) -> &mut Self {
        self.node_header("CMapGroup", 0, n_children)
    }

    pub fn entity_data(&mut self, classname: &str, spawnflags: u32, keyvalues: &[(&str, &str)]) -> &mut Self {
        self.counted(classname).zeros(4).u32(spawnflags);
        self.keyvalues(keyvalues).zeros(12)
    }

    pub fn keyvalues(&mut self, keyvalues: &[(&str, &str)]) -> &mut Self {
        self.u32(keyvalues.len() as u32);
        for (key, value) in keyvalues {
            self.counted(key).counted(value);
        }
        self
    }

    /// A point entity with no children.
    pub fn entity(&mut self, classname: &str, keyvalues: &[(&str, &str)], origin: Vec3) -> &mut Self {
        self.node_header("CMapEntity", 0, 0)
            .entity_data(classname, 0, keyvalues)
            .zeros(2)
            .vec3(origin)
            .zeros(4)
    }

    /// A solid with no children and one face per vertex list.
    pub fn solid(&mut self, version: f32, faces: &[Vec<Vec3>]) -> &mut Self {
        self.node_header("CMapSolid", 0, 0).u32(faces.len() as u32);
        for vertices in faces {
            self.face(version, "brick", vertices);
        }
        self
    }

    /// A face laid out for `version`. The first three vertices double as plane points.
    pub fn face(&mut self, version: f32, texture: &str, vertices: &[Vec3]) -> &mut Self {
        let wide = version > WIDE_FACE_VERSION;
        let has_axes = version >= FACE_AXES_VERSION;

        self.name(
            texture,
            if wide {
                TEXTURE_NAME_LENGTH
            } else {
                TEXTURE_NAME_LENGTH_OLD
            },
        )
        .zeros(4);
        if has_axes {
            self.vec3(Self::RIGHT_AXIS);
        }
        self.f32(Self::FACE_SHIFT_X);
        if has_axes {
            self.vec3(Self::DOWN_AXIS);
        }
        self.f32(Self::FACE_SHIFT_Y)
            .f32(Self::FACE_ROTATION)
            .f32(Self::FACE_SCALE)
            .f32(Self::FACE_SCALE)
            .zeros(if wide { FACE_PAD } else { FACE_PAD_OLD })
            .u32(vertices.len() as u32);
        for v in vertices {
            self.vec3(*v);
        }
        for v in &vertices[..3] {
            self.vec3(*v);
        }
        self
    }

    /// A path whose nodes are indexed by position.
    pub fn path(
        &mut self,
        name: &str,
        classname: &str,
        path_type: u32,
        nodes: &[(Vec3, &[(&str, &str)])],
    ) -> &mut Self {
        self.name(name, PATH_NAME_LENGTH)
            .name(classname, PATH_NAME_LENGTH)
            .u32(path_type)
            .u32(nodes.len() as u32);
        for (index, (position, keyvalues)) in nodes.iter().enumerate() {
            self.vec3(*position)
                .u32(index as u32)
                .name("", PATH_NODE_NAME_LENGTH)
                .keyvalues(keyvalues);
        }
        self
    }

    pub fn docinfo(&mut self, active_camera: u32, cameras: &[(Vec3, Vec3)]) -> &mut Self {
        self.raw(DOCINFO_MAGIC)
            .f32(DOCINFO_VERSION)
            .u32(active_camera)
            .u32(cameras.len() as u32);
        for (eye, lookat) in cameras {
            self.vec3(*eye).vec3(*lookat);
        }
        self
    }

    /// No visgroups, a worldspawn holding one single faced solid, no paths, no cameras.
    pub fn minimal_document(version: f32) -> Vec<u8> {
        let mut w = Self::new();
        w.file_header(version).u32(0);
        w.world_header(1);
        w.solid(version, &[Self::square()]);
        w.entity_data("worldspawn", 0, &[]).u32(0);
        w.docinfo(0, &[]);
        w.into_bytes()
    }
}
