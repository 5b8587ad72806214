use std::io::{Read, Seek};

use crate::{
    binaries::BinaryData,
    error::DecodeError,
    loader::Loader,
    structs::{read_keyvalues, KeyValue},
    view::View,
};

/// Entity properties shared by [`super::World`] and [`super::Entity`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EntityData {
    classname: String,
    spawnflags: u32,
    keyvalues: Vec<KeyValue>,
}

impl EntityData {
    pub fn classname(&self) -> &str {
        &self.classname
    }

    pub fn spawnflags(&self) -> u32 {
        self.spawnflags
    }

    pub fn keyvalues(&self) -> View<'_, KeyValue> {
        View::new(&self.keyvalues)
    }

    pub fn n_keyvalues(&self) -> usize {
        self.keyvalues.len()
    }

    /// Value of the first keyvalue named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keyvalues
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value.as_str())
    }
}

impl BinaryData for EntityData {
    fn read<R: Read + Seek>(loader: &mut Loader<R>) -> Result<Self, DecodeError> {
        let classname = loader.read_counted_string()?;
        loader.skip(4)?;
        let spawnflags = u32::read(loader)?;

        loader.log_begin(
            "entitydata",
            &[("classname", &classname), ("spawnflags", &spawnflags)],
        );
        let keyvalues = read_keyvalues(loader)?;
        loader.skip(12)?;
        loader.log_end();

        Ok(Self {
            classname,
            spawnflags,
            keyvalues,
        })
    }
}
