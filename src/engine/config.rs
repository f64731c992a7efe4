use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Folder layout for on-disk assets. Passed explicitly into the loader and
/// shader construction instead of living in process-global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub models: PathBuf,
    pub shaders: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            models: PathBuf::from("assets/models"),
            shaders: PathBuf::from("assets/shaders"),
        }
    }
}

impl PathConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
