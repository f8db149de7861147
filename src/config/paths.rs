//! Filesystem locations used by the inspector
//!
//! Nothing here is process-wide: callers build a [`SinkPaths`] and pass it
//! down, so tests can point everything at temporary directories.

use std::path::{Path, PathBuf};

/// Name of the root configuration file inside the config directory
pub const ROOT_FILE_NAME: &str = "sink.toml";

/// Directory (relative to the working directory) that receives bar captures
pub const DEFAULT_SCREENSHOT_DIR: &str = ".screenshots";

/// Resolved locations for one inspection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkPaths {
    /// Directory holding `sink.toml`; include patterns are relative to it
    pub config_dir: PathBuf,

    /// Directory that is purged and refilled by each capture
    pub screenshot_dir: PathBuf,
}

impl SinkPaths {
    pub fn new(config_dir: impl Into<PathBuf>, screenshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            screenshot_dir: screenshot_dir.into(),
        }
    }

    /// Path of the root configuration file
    pub fn root_file(&self) -> PathBuf {
        self.config_dir.join(ROOT_FILE_NAME)
    }
}

/// `<home>/.config/kitchnsink`
pub fn default_config_dir(home: &Path) -> PathBuf {
    home.join(".config").join("kitchnsink")
}
