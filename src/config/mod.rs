//! Layered sink configuration
//!
//! Loads `sink.toml` and merges the fragments its `include` patterns match:
//! 1. Root document (`~/.config/kitchnsink/sink.toml`)
//! 2. Fragments, pattern by pattern, matches sorted by path
//!
//! Only `dish` and `layout` are merged, shallowly, last fragment wins.

mod document;
mod include;
mod merge;
mod paths;

pub use document::{display_value, toml_to_json, SinkConfig, DISH_KEY, INCLUDE_KEY, LAYOUT_KEY};
pub use include::{expand_pattern, IncludeError};
pub use merge::{
    apply_fragment, load_fragment, merge_includes, shallow_update, FragmentError,
    FragmentFailure, MergeOutcome, MERGED_SECTIONS,
};
pub use paths::{default_config_dir, SinkPaths, DEFAULT_SCREENSHOT_DIR, ROOT_FILE_NAME};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors for the root configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'include' must be an array of glob patterns, got {0}")]
    InvalidInclude(String),
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound(_))
    }
}

/// Loads the root document and resolves its includes
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    root_file: PathBuf,
}

impl ConfigLoader {
    /// Loader for `<config_dir>/sink.toml`
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let root_file = config_dir.join(ROOT_FILE_NAME);
        Self {
            config_dir,
            root_file,
        }
    }

    pub fn from_paths(paths: &SinkPaths) -> Self {
        Self::new(paths.config_dir.clone())
    }

    /// Use a root file outside the config directory; includes still resolve
    /// against `config_dir`
    pub fn with_root_file(mut self, root_file: impl Into<PathBuf>) -> Self {
        self.root_file = root_file.into();
        self
    }

    pub fn root_file(&self) -> &Path {
        &self.root_file
    }

    /// Load the root document and merge every include into it
    pub fn load(&self) -> Result<MergeOutcome, ConfigError> {
        let root = self.load_root()?;
        merge_includes(root, &self.config_dir)
    }

    /// Load the root document without resolving includes
    pub fn load_root(&self) -> Result<SinkConfig, ConfigError> {
        let path = &self.root_file;
        if !path.exists() {
            return Err(ConfigError::NotFound(path.clone()));
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        SinkConfig::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })
    }
}
