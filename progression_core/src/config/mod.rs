//! Configuration - tunable constants and TOML loading helpers

mod constants;

pub use constants::ProgressionConstants;

use crate::skill::TreeError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error loading progression configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error in '{path:?}': {message}")]
    Validation {
        message: String,
        path: Option<PathBuf>,
    },
    #[error("Invalid skill tree '{tree}': {error}")]
    Tree { tree: String, error: TreeError },
}

impl ConfigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation {
            message: message.into(),
            path: None,
        }
    }

    /// Attach a file path to an error raised while parsing its contents
    pub(crate) fn at_path(self, file: &Path) -> Self {
        let file = Some(file.to_path_buf());
        match self {
            ConfigError::Io { error, .. } => ConfigError::Io { error, path: file },
            ConfigError::Parse { error, .. } => ConfigError::Parse { error, path: file },
            ConfigError::Validation { message, .. } => ConfigError::Validation { message, path: file },
            other => other,
        }
    }
}

/// Parse a TOML string into `T`
pub(crate) fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|error| ConfigError::Parse { error, path: None })
}

/// Read a file to a string
pub(crate) fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
        error,
        path: Some(path.to_path_buf()),
    })
}

/// Read and parse a TOML file into `T`
pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = read_file(path)?;
    parse_toml(&content).map_err(|e| e.at_path(path))
}

/// All `*.toml` files under `dir`, recursively, in sorted order
///
/// A missing directory yields no files.
pub(crate) fn toml_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files = Vec::new();
    collect_toml_files(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_toml_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ConfigError> {
    if !dir.exists() {
        return Ok(());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
        error: e,
        path: Some(dir.to_path_buf()),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_toml_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }

    Ok(())
}
