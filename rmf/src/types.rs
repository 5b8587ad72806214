use std::{
    borrow::Cow,
    fmt,
    io::{Read, Seek},
};

use glam::Vec3;

use crate::{error::DecodeError, loader::Loader};

/// Editor color, three bytes with no padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

/// A fixed width name slot. The slot is kept whole; text ends at the first NUL.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FixedName {
    bytes: Box<[u8]>,
}

impl FixedName {
    pub fn from_slot(bytes: Box<[u8]>) -> Self {
        Self { bytes }
    }

    /// Width of the slot on disk.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Whole slot including the terminator and anything after it.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes before the first NUL.
    pub fn text_bytes(&self) -> &[u8] {
        let end = self
            .bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.bytes.len());
        &self.bytes[..end]
    }

    pub fn to_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.text_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.text_bytes().is_empty()
    }
}

impl fmt::Debug for FixedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedName<{}>({:?})", self.capacity(), self.to_str())
    }
}

impl fmt::Display for FixedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_str())
    }
}

pub(crate) fn fmt_vec3(v: Vec3) -> impl fmt::Display {
    struct V(Vec3);
    impl fmt::Display for V {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} {} {}", self.0.x, self.0.y, self.0.z)
        }
    }
    V(v)
}

const VEC3_SIZE: usize = 12;

impl<R: Read + Seek> Loader<R> {
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let mut b = [0; 1];
        self.read_into(&mut b)?;
        Ok(b[0])
    }

    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        let mut b = [0; 4];
        self.read_into(&mut b)?;
        Ok(u32::from_le_bytes(b))
    }

    pub fn read_f32_le(&mut self) -> Result<f32, DecodeError> {
        let mut b = [0; 4];
        self.read_into(&mut b)?;
        Ok(f32::from_le_bytes(b))
    }

    /// Raw slot of `n` bytes.
    pub fn read_fixed_bytes(&mut self, n: usize) -> Result<Box<[u8]>, DecodeError> {
        self.ensure(n as u64)?;
        let mut slot: Box<[u8]> = bytemuck::zeroed_slice_box(n);
        self.read_into(&mut slot)?;
        Ok(slot)
    }

    pub fn read_name(&mut self, n: usize) -> Result<FixedName, DecodeError> {
        self.read_fixed_bytes(n).map(FixedName::from_slot)
    }

    /// Reads a length byte `L` then `L` bytes ending in NUL, returning the bytes before the NUL.
    pub fn read_counted_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let offset = self.offset();
        let length = self.read_u8()?;
        if length == 0 {
            return Err(DecodeError::InvalidLength { offset });
        }
        let mut data = self.read(length as usize)?;
        if data.pop() != Some(0) {
            return Err(DecodeError::NotNulTerminated { offset });
        }
        Ok(data)
    }

    pub fn read_counted_string(&mut self) -> Result<String, DecodeError> {
        let data = self.read_counted_bytes()?;
        Ok(String::from_utf8(data)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    pub fn read_vector3(&mut self) -> Result<Vec3, DecodeError> {
        Ok(Vec3::new(
            self.read_f32_le()?,
            self.read_f32_le()?,
            self.read_f32_le()?,
        ))
    }

    pub fn read_color(&mut self) -> Result<Color, DecodeError> {
        let mut b = [0; 3];
        self.read_into(&mut b)?;
        Ok(bytemuck::pod_read_unaligned(&b))
    }

    /// Reads `count` vectors as one contiguous block.
    pub fn read_vectors(&mut self, count: u32) -> Result<Vec<Vec3>, DecodeError> {
        self.ensure(count as u64 * VEC3_SIZE as u64)?;

        let mut vectors: Box<[Vec3]> = bytemuck::zeroed_slice_box(count as usize);
        self.read_into(bytemuck::cast_slice_mut(&mut vectors))?;

        #[cfg(target_endian = "big")]
        for v in vectors.iter_mut() {
            *v = Vec3::from_array(v.to_array().map(|f| f32::from_bits(u32::from_le(f.to_bits()))));
        }

        Ok(vectors.into_vec())
    }
}

#[cfg(test)]
mod types_tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::LoadOptions;

    fn loader(bytes: &[u8]) -> Loader<Cursor<&[u8]>> {
        Loader::new(Cursor::new(bytes), LoadOptions::default()).unwrap()
    }

    fn counted(s: &str) -> Vec<u8> {
        let mut out = vec![s.len() as u8 + 1];
        out.extend_from_slice(s.as_bytes());
        out.push(0);
        out
    }

    #[test]
    fn little_endian_scalars() {
        let mut bytes = vec![0x2a];
        bytes.extend_from_slice(&0xdead_beefu32.to_le_bytes());
        bytes.extend_from_slice(&2.2f32.to_le_bytes());
        let mut loader = loader(&bytes);

        assert_eq!(loader.read_u8().unwrap(), 0x2a);
        assert_eq!(loader.read_u32_le().unwrap(), 0xdead_beef);
        assert_eq!(loader.read_f32_le().unwrap(), 2.2);
        assert_eq!(loader.remaining(), 0);
    }

    #[test]
    fn counted_strings_every_length() {
        // length byte L covers L - 1 characters plus the NUL
        for length in 1..=255usize {
            let s: String = (0..length - 1).map(|i| (b'a' + (i % 26) as u8) as char).collect();
            let bytes = counted(&s);
            assert_eq!(bytes[0] as usize, length);

            let mut loader = loader(&bytes);
            assert_eq!(loader.read_counted_string().unwrap(), s);
            assert_eq!(loader.offset(), length as u64 + 1);
        }
    }

    #[test]
    fn counted_string_zero_length() {
        let mut loader = loader(&[0, b'a', 0]);
        assert!(matches!(
            loader.read_counted_string().unwrap_err(),
            DecodeError::InvalidLength { offset: 0 }
        ));
    }

    #[test]
    fn counted_string_without_nul() {
        let mut loader = loader(&[3, b'a', b'b', b'c']);
        assert!(matches!(
            loader.read_counted_string().unwrap_err(),
            DecodeError::NotNulTerminated { offset: 0 }
        ));
    }

    #[test]
    fn counted_string_truncated() {
        let mut loader = loader(&[5, b'a', 0]);
        assert!(matches!(
            loader.read_counted_string().unwrap_err(),
            DecodeError::Truncated { offset: 1, .. }
        ));
    }

    #[test]
    fn vectors_and_colors() {
        let mut bytes = vec![10, 20, 30];
        for f in [1.0f32, -2.0, 3.5, 4.0, 5.0, 6.0] {
            bytes.extend_from_slice(&f.to_le_bytes());
        }
        let mut loader = loader(&bytes);

        assert_eq!(
            loader.read_color().unwrap(),
            Color {
                r: 10,
                g: 20,
                b: 30
            }
        );
        assert_eq!(
            loader.read_vectors(2).unwrap(),
            vec![Vec3::new(1.0, -2.0, 3.5), Vec3::new(4.0, 5.0, 6.0)]
        );
    }

    #[test]
    fn vector_block_checks_length_first() {
        let mut loader = loader(&[0; 20]);
        assert!(matches!(
            loader.read_vectors(u32::MAX).unwrap_err(),
            DecodeError::Truncated { offset: 0, .. }
        ));
    }

    #[test]
    fn fixed_names_stop_at_nul() {
        let mut slot = b"brick".to_vec();
        slot.resize(36, 0);
        slot[20] = b'x';
        let mut loader = loader(&slot);

        let name = loader.read_name(36).unwrap();
        assert_eq!(name.capacity(), 36);
        assert_eq!(name.to_str(), "brick");
        assert_eq!(name.as_bytes()[20], b'x');
    }
}
