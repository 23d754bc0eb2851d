// Tool Info Port - the adapter contract
// One implementation per supported external program

use std::path::{Path, PathBuf};

use crate::domain::program_files::program_files_from_executable;
use crate::domain::outcome::RESULT_DONE;
use crate::domain::{EnvironmentAdjustments, ProcessExitCode, ResourceLimits, Task};
use crate::error::Result;
use crate::port::ToolLocator;

/// Adapter between the benchmarking harness and one external tool.
///
/// `name()` and `executable()` have to be implemented. Everything else has a
/// default that fits simple tools; typical adapters also override
/// `version()`, `cmdline()` and `determine_result()`.
///
/// A harness calls one adapter instance for many runs, possibly in parallel.
/// Implementations must not keep per-run state: everything a call needs comes
/// in through its arguments.
///
/// # Example
/// ```ignore
/// struct MyTool;
///
/// impl ToolInfo for MyTool {
///     fn name(&self) -> &str {
///         "My Tool"
///     }
///
///     fn executable(&self, locator: &dyn ToolLocator) -> Result<PathBuf> {
///         locator.find_executable("mytool", None)
///     }
/// }
/// ```
pub trait ToolInfo: Send + Sync {
    /// Name of the tool, formatted for humans. Must not be empty.
    fn name(&self) -> &str;

    /// Path to the executable file that gets executed, relative to the
    /// current directory (typically found through the locator).
    fn executable(&self, locator: &dyn ToolLocator) -> Result<PathBuf>;

    /// Path patterns used by the default `program_files()`, relative to the
    /// directory of the executable
    fn required_paths(&self) -> &[&str] {
        &[]
    }

    /// Version of the tool, or an empty string if unknown.
    ///
    /// Extract the version from the tool itself instead of hard-coding it
    /// (see `version_from_tool` in toolinfo-infra-system).
    fn version(&self, _executable: &Path) -> String {
        String::new()
    }

    /// Environment changes the tool needs. Default: none.
    fn environment(&self, _executable: &Path) -> EnvironmentAdjustments {
        EnvironmentAdjustments::default()
    }

    /// Files and directories needed to run the tool somewhere else
    /// (e.g. on a remote worker).
    ///
    /// Default: the executable plus all paths matching `required_paths()`.
    fn program_files(&self, executable: &Path) -> Vec<PathBuf> {
        let mut files = vec![executable.to_path_buf()];
        files.extend(program_files_from_executable(
            executable,
            self.required_paths(),
            false,
        ));
        files
    }

    /// Directory the tool should run in. Default: the current directory.
    fn working_directory(&self, _executable: &Path) -> PathBuf {
        PathBuf::from(".")
    }

    /// Command line for one run.
    ///
    /// `options` are the user-specified options in the given order. All paths
    /// (executable and task) are absolute or relative to the working directory.
    ///
    /// # Errors
    /// DomainError::UnsupportedFeature if the tool cannot handle `task`
    fn cmdline(
        &self,
        executable: &Path,
        options: &[String],
        task: &Task,
        _rlimits: &ResourceLimits,
    ) -> Result<Vec<String>> {
        let mut cmd = Vec::with_capacity(1 + options.len() + task.input_files_or_empty().len());
        cmd.push(executable.display().to_string());
        cmd.extend(options.iter().cloned());
        cmd.extend(task.input_files_or_identifier().into_iter().map(String::from));
        Ok(cmd)
    }

    /// Classify a finished run.
    ///
    /// Returns one of the `domain::outcome` labels if the tool gave a result,
    /// otherwise any non-empty string hinting at the failure (e.g. "CRASH").
    /// The harness adds timeout and signal information on its own afterwards.
    ///
    /// `output` holds stdout and stderr lines; `is_timeout` tells a kill due to
    /// a time limit apart from other terminations.
    fn determine_result(
        &self,
        _exit_code: &ProcessExitCode,
        _output: &[String],
        _is_timeout: bool,
    ) -> String {
        RESULT_DONE.to_string()
    }

    /// Extract a statistic value for the user-specified `identifier` from the
    /// output. The value may contain HTML.
    fn get_value_from_output(&self, _lines: &[String], _identifier: &str) -> Option<String> {
        None
    }
}
