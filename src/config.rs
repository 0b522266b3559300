//! Configuration file support.

use crate::error::{ChunkError, Result};
use crate::pipeline::{ChunkSize, DEFAULT_CHUNK_SIZE_KB};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where chunk directories are created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_location")]
    pub location: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Chunk size in KB when the caller gives none
    #[serde(default = "default_chunk_size_kb")]
    pub default_chunk_size_kb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `chunkanalyzer=trace`
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_location() -> PathBuf {
    PathBuf::from("split-files")
}

fn default_chunk_size_kb() -> u64 {
    DEFAULT_CHUNK_SIZE_KB
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            default_chunk_size_kb: default_chunk_size_kb(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ChunkError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check values that would otherwise fail deep inside an operation
    pub fn validate(&self) -> Result<()> {
        if self.storage.location.as_os_str().is_empty() {
            return Err(ChunkError::Config("storage.location must not be empty".into()));
        }
        ChunkSize::from_kb(self.split.default_chunk_size_kb)?;
        Ok(())
    }
}
