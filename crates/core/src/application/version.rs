// Version probe
// Runs `<executable> --version` (or similar) and extracts a version string

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::constants::DEFAULT_VERSION_ARG;
use crate::port::CommandRunner;

/// How to ask a tool for its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionQuery {
    /// Argument that makes the tool print its version
    pub arg: String,
    /// Read the version from stderr instead of stdout
    pub use_stderr: bool,
    /// Accept output on stderr while reading stdout
    pub ignore_stderr: bool,
    /// Only return the rest of the first line starting with this prefix
    pub line_prefix: Option<String>,
}

impl Default for VersionQuery {
    fn default() -> Self {
        Self {
            arg: DEFAULT_VERSION_ARG.to_string(),
            use_stderr: false,
            ignore_stderr: false,
            line_prefix: None,
        }
    }
}

impl VersionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = arg.into();
        self
    }

    pub fn use_stderr(mut self) -> Self {
        self.use_stderr = true;
        self
    }

    pub fn ignore_stderr(mut self) -> Self {
        self.ignore_stderr = true;
        self
    }

    pub fn line_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.line_prefix = Some(prefix.into());
        self
    }
}

/// Determines tool versions by running the tool.
///
/// Version information is optional: every failure is logged as a warning and
/// yields an empty string. The call blocks until the tool exits.
pub struct VersionProbe {
    runner: Arc<dyn CommandRunner>,
}

impl VersionProbe {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Run `executable` with `query.arg` and return its version, or `""`
    pub fn version_from_tool(&self, executable: &Path, query: &VersionQuery) -> String {
        let captured = match self.runner.run(executable, std::slice::from_ref(&query.arg)) {
            Ok(captured) => captured,
            Err(e) => {
                warn!(
                    executable = %executable.display(),
                    error = %e,
                    "Cannot run tool to determine version"
                );
                return String::new();
            }
        };

        if !captured.stderr.is_empty() && !query.use_stderr && !query.ignore_stderr {
            warn!(
                executable = %executable.display(),
                stderr = %captured.stderr_lossy(),
                "Cannot determine version, tool wrote to stderr"
            );
            return String::new();
        }

        if !captured.exit_code.success() {
            warn!(
                executable = %executable.display(),
                exit_code = %captured.exit_code,
                "Cannot determine version, tool failed"
            );
            return String::new();
        }

        let output = if query.use_stderr {
            captured.stderr_lossy()
        } else {
            captured.stdout_lossy()
        };
        let version = extract_version(&output, query.line_prefix.as_deref());

        debug!(executable = %executable.display(), version = %version, "Determined tool version");
        version
    }
}

/// Trim `output`; with a non-empty `line_prefix`, return the trimmed rest of
/// the first line starting with it (`""` if no line does).
pub fn extract_version(output: &str, line_prefix: Option<&str>) -> String {
    let output = output.trim();
    match line_prefix.filter(|prefix| !prefix.is_empty()) {
        Some(prefix) => output
            .lines()
            .find_map(|line| line.strip_prefix(prefix))
            .map(|rest| rest.trim().to_string())
            .unwrap_or_default(),
        None => output.to_string(),
    }
}
