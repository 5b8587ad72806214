use std::io::{Read, Seek};

use glam::Vec3;

use crate::{error::DecodeError, loader::Loader, types::Color};

/// A record with a fixed decode routine.
pub trait BinaryData {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError>
    where
        Self: Sized;

    /// Reads `count` records back to back.
    fn read_list<R: Read + Seek>(
        loader: &mut Loader<R>,
        count: u32,
        min_size: usize,
    ) -> Result<Vec<Self>, DecodeError>
    where
        Self: Sized,
    {
        let mut items = Vec::with_capacity(loader.capacity_hint(count, min_size));
        for _ in 0..count {
            items.push(Self::read(loader)?);
        }
        Ok(items)
    }
}

impl BinaryData for u32 {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.read_u32_le()
    }
}

impl BinaryData for f32 {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.read_f32_le()
    }
}

impl BinaryData for Vec3 {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.read_vector3()
    }
}

impl BinaryData for Color {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        loader.read_color()
    }
}
