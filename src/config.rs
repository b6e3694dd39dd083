//! # Configuration
//!
//! JSON configuration shared by every CLI mode. All fields are optional; anything missing
//! falls back to its default and may be supplied on the command line instead.
//!
//! ```json
//! {
//!   "encode":  { "input": "cover.png", "output": "stego.png", "text": "hello" },
//!   "decode":  { "input": "stego.png" },
//!   "compare": { "first": "cover.png", "second": "stego.png", "output": "diff.png" },
//!   "eot": "#",
//!   "entry": 1,
//!   "key": 3,
//!   "channel": "blue"
//! }
//! ```

use crate::channel::Channel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub first: Option<PathBuf>,
    pub second: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Settings for one run of the tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub encode: EncodeConfig,
    pub decode: DecodeConfig,
    pub compare: CompareConfig,

    /// End-of-text marker appended on encode and searched for on decode.
    pub eot: String,
    /// First bit-slot index.
    pub entry: i64,
    /// Step key.
    pub key: i64,
    /// Channel name; `op` is accepted for older files.
    #[serde(alias = "op")]
    pub channel: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolves the configured channel name.
    ///
    /// Unknown names, including an empty one, fall back to [`Channel::Red`] rather than
    /// failing.
    pub fn channel(&self) -> Channel {
        self.channel.parse().unwrap_or_else(|err| {
            log::warn!("{err}; falling back to {}", Channel::Red);
            Channel::Red
        })
    }
}
