use std::{path::Path, str::FromStr};

use ini::Ini;
use thiserror::Error;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Ini section holding the decoder settings.
pub const DECODE_SECTION: &str = "decode";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file")]
    Read(#[from] ini::Error),
    #[error("could not parse config")]
    Parse(#[from] ini::ParseError),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// What to do with an object whose type string is not one of the known tags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnknownNodePolicy {
    /// Abort with [`crate::DecodeError::UnexpectedTag`].
    #[default]
    Reject,
    /// Consume the common header and children, then keep an unknown node and
    /// record a [`crate::Diagnostic::UnknownTag`]. Anything the object stores
    /// after its children is not skipped, so later siblings may misalign.
    Keep,
}

impl FromStr for UnknownNodePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "keep" => Ok(Self::Keep),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Deepest object nesting accepted before giving up.
    pub max_depth: usize,
    /// Record a [`crate::Trace`] while decoding.
    pub trace: bool,
    pub unknown_nodes: UnknownNodePolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            trace: false,
            unknown_nodes: UnknownNodePolicy::default(),
        }
    }
}

impl LoadOptions {
    /// Reads the `[decode]` section. Missing keys keep their defaults.
    ///
    /// ```ini
    /// [decode]
    /// max_depth = 64
    /// trace = true
    /// unknown_nodes = keep
    /// ```
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        let Some(section) = ini.section(Some(DECODE_SECTION)) else {
            return Ok(options);
        };

        if let Some(value) = section.get("max_depth") {
            options.max_depth = value
                .trim()
                .parse()
                .map_err(|_| invalid("max_depth", value))?;
        }
        if let Some(value) = section.get("trace") {
            options.trace = parse_bool(value).ok_or_else(|| invalid("trace", value))?;
        }
        if let Some(value) = section.get("unknown_nodes") {
            options.unknown_nodes = value
                .parse()
                .map_err(|_| invalid("unknown_nodes", value))?;
        }

        Ok(options)
    }

    pub fn from_ini_str(source: &str) -> Result<Self, ConfigError> {
        Self::from_ini(&Ini::load_from_str(source)?)
    }

    pub fn load_ini(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_ini(&Ini::load_from_file(path)?)
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_owned(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
