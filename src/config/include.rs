//! Include pattern expansion
//!
//! Patterns are shell-style globs relative to the configuration directory.
//! Wildcards never cross a `/` (`**` included, it behaves like `*`),
//! dot-files only match a pattern component that starts with `.`, and only
//! regular files are returned.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors for include patterns
#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    #[error("Glob pattern error: {0}")]
    Pattern(#[from] globset::Error),
}

/// Expand one include pattern against `config_dir`.
///
/// Matches are sorted lexicographically so that "later fragment wins" does
/// not depend on directory enumeration order.
pub fn expand_pattern(config_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, IncludeError> {
    let full = config_dir.join(pattern);
    let components: Vec<String> = full
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let Some(first_glob) = components.iter().position(|c| has_glob_meta(c)) else {
        // Literal path, no walking needed
        return Ok(if full.is_file() { vec![full] } else { Vec::new() });
    };

    let walk_root: PathBuf = full.components().take(first_glob).collect();
    // `**` is not recursive: it matches one component, like `*`
    let pattern_parts: Vec<String> = components[first_glob..]
        .iter()
        .map(|c| if c == "**" { "*".to_string() } else { c.clone() })
        .collect();
    let matcher = compile(&pattern_parts.join("/"))?;
    let depth = pattern_parts.len();

    let mut matches: Vec<PathBuf> = WalkDir::new(&walk_root)
        .follow_links(true)
        .min_depth(depth)
        .max_depth(depth)
        .into_iter()
        // Unreadable or missing directories simply produce no matches
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let rel = entry.path().strip_prefix(&walk_root).ok()?;
            if hides_dotfile(rel, &pattern_parts) || !matcher.is_match(rel) {
                return None;
            }
            Some(entry.into_path())
        })
        .collect();

    matches.sort();
    Ok(matches)
}

fn compile(pattern: &str) -> Result<GlobMatcher, IncludeError> {
    let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
    Ok(glob.compile_matcher())
}

fn has_glob_meta(component: &str) -> bool {
    component.contains(['*', '?', '['])
}

/// True when a dot-prefixed path component would only match through a wildcard
fn hides_dotfile(rel: &Path, pattern_parts: &[String]) -> bool {
    rel.components().zip(pattern_parts).any(|(part, pat)| {
        part.as_os_str().to_string_lossy().starts_with('.') && !pat.starts_with('.')
    })
}
