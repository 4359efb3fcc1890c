//! Configuration file format and loading.
//!
//! The file is JSON with camelCase keys. `maxVoices` and `watchConfig` are
//! read once at startup; `voices` and `triggers` are re-applied on every
//! reload.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::dsp::EnvelopeSpec;

/// Written to the config path on first run.
pub const DEFAULT_CONFIG: &str = include_str!("default.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't write default config to {path}: {source}")]
    WriteDefault {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Upper bound on simultaneously sounding voices; 0 means unbounded.
    #[serde(default)]
    pub max_voices: usize,
    #[serde(default)]
    pub watch_config: bool,
    #[serde(default)]
    pub voices: BTreeMap<String, VoiceConfig>,
    #[serde(default)]
    pub triggers: Vec<TriggerConfig>,
}

/// One voice recipe as written in the file.
///
/// The oscillator descriptor stays an untyped object here; it is checked per
/// entry when the voice table is installed so a single bad voice doesn't
/// reject the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub osc: Map<String, Value>,
    pub env: EnvelopeSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub regex: String,
    pub voice: String,
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The configuration shipped with the crate.
    pub fn shipped_default() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    /// Read `path`, writing the shipped default there first if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config not found, writing default");
            fs::write(path, DEFAULT_CONFIG).map_err(|source| ConfigError::WriteDefault {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
