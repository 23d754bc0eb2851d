// Program files helper
// Expands required-path patterns relative to a tool's executable

use std::path::{Path, PathBuf};
use tracing::warn;

/// Expand `required_paths` relative to the directory of `executable`
/// (or its parent directory if `parent_dir` is set).
///
/// Unlike the default `program_files()`, the executable itself is not added;
/// the patterns are expected to cover it.
pub fn program_files_from_executable(
    executable: &Path,
    required_paths: &[&str],
    parent_dir: bool,
) -> Vec<PathBuf> {
    let mut base_dir = executable
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    if parent_dir {
        base_dir = base_dir.join("..");
    }

    required_paths
        .iter()
        .flat_map(|pattern| expand_filename_pattern(pattern, &base_dir))
        .collect()
}

/// Expand one pattern (`~`, `$VAR` and glob syntax) relative to `base_dir`.
///
/// Returns the sorted list of existing matches. Absolute patterns ignore
/// `base_dir`. Invalid patterns are logged and expand to nothing.
pub fn expand_filename_pattern(pattern: &str, base_dir: &Path) -> Vec<PathBuf> {
    let expanded = match shellexpand::full(pattern) {
        Ok(expanded) => expanded.into_owned(),
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "Cannot expand variables in path pattern");
            pattern.to_string()
        }
    };

    let full_pattern = base_dir.join(&expanded);
    let entries = match glob::glob(&full_pattern.to_string_lossy()) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "Invalid path pattern");
            return Vec::new();
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "Cannot read path matching pattern");
                None
            }
        })
        .collect();
    matches.sort();
    matches
}
