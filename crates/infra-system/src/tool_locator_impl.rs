// Tool locator implementation
// Searches a tool directory, $PATH and the current directory for executables
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use toolinfo_core::port::ToolLocator;
use toolinfo_core::{AppError, Result};

/// Finds tool executables on the local file system.
///
/// With a tool directory, only that directory is searched (first its `subdir`,
/// then the directory itself). Without one, `$PATH` and/or the current
/// directory are searched, as configured.
#[derive(Debug, Clone)]
pub struct PathToolLocator {
    tool_directory: Option<PathBuf>,
    use_path: bool,
    use_current: bool,
}

impl PathToolLocator {
    /// Search only in `tool_directory`
    pub fn with_tool_directory(tool_directory: impl Into<PathBuf>) -> Self {
        Self {
            tool_directory: Some(tool_directory.into()),
            use_path: false,
            use_current: false,
        }
    }

    /// Search `$PATH` and the current directory
    pub fn from_environment() -> Self {
        Self {
            tool_directory: None,
            use_path: true,
            use_current: true,
        }
    }

    /// Tool directory if given, `$PATH` and current directory otherwise
    pub fn new(tool_directory: Option<PathBuf>) -> Self {
        match tool_directory {
            Some(dir) => Self::with_tool_directory(dir),
            None => Self::from_environment(),
        }
    }

    /// Directories to search, in order
    fn search_dirs(&self, subdir: Option<&str>) -> Vec<PathBuf> {
        let subdir = subdir.filter(|s| !s.is_empty());

        if let Some(tool_dir) = &self.tool_directory {
            let mut dirs = Vec::new();
            if let Some(sub) = subdir {
                dirs.push(tool_dir.join(sub));
            }
            dirs.push(tool_dir.clone());
            return dirs;
        }

        let mut dirs = Vec::new();
        if self.use_path {
            if let Some(path_env) = env::var_os("PATH") {
                dirs.extend(env::split_paths(&path_env));
            }
        }
        if self.use_current {
            let current = PathBuf::from(".");
            if let Some(sub) = subdir {
                dirs.push(current.join(sub));
            }
            dirs.push(current);
        }
        dirs
    }
}

impl Default for PathToolLocator {
    fn default() -> Self {
        Self::from_environment()
    }
}

impl ToolLocator for PathToolLocator {
    fn find_executable(&self, name: &str, subdir: Option<&str>) -> Result<PathBuf> {
        let dirs = self.search_dirs(subdir);

        for dir in &dirs {
            let candidate = dir.join(name);
            if !candidate.is_file() {
                continue;
            }
            if is_executable(&candidate) {
                debug!(name = %name, path = %candidate.display(), "Found executable");
                return Ok(candidate);
            }
            warn!(path = %candidate.display(), "Found file with tool name but it is not executable");
        }

        Err(AppError::ToolNotFound(format!(
            "could not find executable '{}' (searched {} directories)",
            name,
            dirs.len()
        )))
    }
}

/// Check the execute permission bits (Unix); any regular file counts elsewhere
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn write_file(path: &Path, mode: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_prefers_subdir() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("bin/wasp-c"), 0o755);
        write_file(&dir.path().join("wasp-c"), 0o755);

        let locator = PathToolLocator::with_tool_directory(dir.path());
        let found = locator.find_executable("wasp-c", Some("bin")).unwrap();

        assert_eq!(found, dir.path().join("bin/wasp-c"));
    }

    #[test]
    fn test_falls_back_to_tool_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("wasp-c"), 0o755);

        let locator = PathToolLocator::with_tool_directory(dir.path());
        let found = locator.find_executable("wasp-c", Some("bin")).unwrap();

        assert_eq!(found, dir.path().join("wasp-c"));
    }

    #[test]
    fn test_skips_non_executable() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("tool"), 0o644);

        let locator = PathToolLocator::with_tool_directory(dir.path());
        let result = locator.find_executable("tool", None);

        assert!(matches!(result, Err(AppError::ToolNotFound(_))));
    }

    #[test]
    fn test_missing_tool() {
        let dir = tempfile::tempdir().unwrap();

        let locator = PathToolLocator::with_tool_directory(dir.path());

        assert!(locator.find_executable("nothing-here", None).is_err());
    }

    #[test]
    fn test_finds_shell_in_path() {
        let locator = PathToolLocator::from_environment();

        let found = locator.find_executable("sh", None).unwrap();

        assert!(found.ends_with("sh"));
    }
}
