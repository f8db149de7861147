//! Include merge logic
//!
//! Fragments matched by `include` patterns are applied onto the base
//! document in order. Only the `dish` and `layout` sections take part:
//! - Sections: shallow update by child key (last wins)
//! - Child values: REPLACE (no recursion into dish settings)
//! - Every other top-level key of the base is left untouched

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::document::{SinkConfig, DISH_KEY, LAYOUT_KEY};
use super::include::{expand_pattern, IncludeError};
use super::ConfigError;

/// Sections a fragment may contribute, in application order
pub const MERGED_SECTIONS: &[&str] = &[DISH_KEY, LAYOUT_KEY];

/// Errors isolated to a single include pattern or fragment file
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("'{section}' must be a table")]
    NotATable { section: String },

    #[error(transparent)]
    Pattern(#[from] IncludeError),

    #[error("include entry must be a string, got {0}")]
    NonStringPattern(String),
}

/// A fragment or pattern that was skipped
#[derive(Debug)]
pub struct FragmentFailure {
    /// Fragment path, or the include pattern when no file was involved
    pub origin: String,
    pub error: FragmentError,
}

impl std::fmt::Display for FragmentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.origin, self.error)
    }
}

/// Result of applying every include onto a base document
#[derive(Debug)]
pub struct MergeOutcome {
    /// The merged configuration
    pub config: SinkConfig,

    /// Fragment files applied, in application order
    pub applied: Vec<PathBuf>,

    /// Fragments and patterns that were skipped
    pub failures: Vec<FragmentFailure>,
}

impl MergeOutcome {
    fn unchanged(config: SinkConfig) -> Self {
        Self {
            config,
            applied: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn record_failure(&mut self, origin: String, error: FragmentError) {
        tracing::warn!(origin = %origin, error = %error, "skipping included config");
        self.failures.push(FragmentFailure { origin, error });
    }
}

/// Apply every `include` of `base`, resolving patterns against `config_dir`.
///
/// A fragment that cannot be read, parsed or applied is recorded in
/// [`MergeOutcome::failures`] and the merge carries on with the next match.
/// The only hard error is an `include` value that is not an array.
pub fn merge_includes(base: SinkConfig, config_dir: &Path) -> Result<MergeOutcome, ConfigError> {
    if base.has_no_includes() {
        return Ok(MergeOutcome::unchanged(base));
    }

    let patterns = match base.includes() {
        Some(Value::Array(items)) => items.clone(),
        Some(other) => return Err(ConfigError::InvalidInclude(other.to_string())),
        None => Vec::new(),
    };

    let mut outcome = MergeOutcome::unchanged(base);

    for entry in patterns {
        let pattern = match entry {
            Value::String(s) => s,
            other => {
                let shown = other.to_string();
                outcome.record_failure(shown.clone(), FragmentError::NonStringPattern(shown));
                continue;
            }
        };

        let matches = match expand_pattern(config_dir, &pattern) {
            Ok(m) => m,
            Err(e) => {
                outcome.record_failure(pattern, e.into());
                continue;
            }
        };
        tracing::debug!(pattern = %pattern, matches = matches.len(), "expanded include");

        for path in matches {
            match load_fragment(&path).and_then(|f| apply_fragment(&mut outcome.config, &f)) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "applied fragment");
                    outcome.applied.push(path);
                }
                Err(e) => outcome.record_failure(path.display().to_string(), e),
            }
        }
    }

    Ok(outcome)
}

/// Read and parse one fragment file
pub fn load_fragment(path: &Path) -> Result<SinkConfig, FragmentError> {
    let contents = fs::read_to_string(path)?;
    Ok(SinkConfig::from_toml_str(&contents)?)
}

/// Apply a fragment's `dish` and `layout` sections onto `merged`.
///
/// Sections are applied in order; if `layout` fails, an already applied
/// `dish` stays applied.
pub fn apply_fragment(merged: &mut SinkConfig, fragment: &SinkConfig) -> Result<(), FragmentError> {
    for section in MERGED_SECTIONS {
        let Some(value) = fragment.get(section) else {
            continue;
        };
        let overlay = value.as_object().ok_or_else(|| FragmentError::NotATable {
            section: section.to_string(),
        })?;
        shallow_update(merged.as_map_mut(), section, overlay)?;
    }
    Ok(())
}

/// Insert every child of `overlay` into `target[section]`, creating the
/// section if needed. Colliding children are replaced wholesale.
pub fn shallow_update(
    target: &mut Map<String, Value>,
    section: &str,
    overlay: &Map<String, Value>,
) -> Result<(), FragmentError> {
    let slot = target
        .entry(section)
        .or_insert_with(|| Value::Object(Map::new()));
    let section_map = slot.as_object_mut().ok_or_else(|| FragmentError::NotATable {
        section: section.to_string(),
    })?;

    for (key, value) in overlay {
        section_map.insert(key.clone(), value.clone());
    }
    Ok(())
}
