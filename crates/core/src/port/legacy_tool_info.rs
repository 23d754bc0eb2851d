// Legacy Tool Info Port
// First generation of the adapter contract, predates Task and ResourceLimits.
// Still supported through LegacyToolAdapter; new adapters should implement ToolInfo.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::program_files::program_files_from_executable;
use crate::domain::outcome::RESULT_DONE;
use crate::domain::{EnvironmentAdjustments, ResourceLimits};
use crate::error::Result;
use crate::port::ToolLocator;

/// Key of the legacy limits map: CPU-time limit in seconds
pub const TIMELIMIT: &str = "timelimit";
/// Key of the legacy limits map: soft CPU-time limit in seconds
pub const SOFTTIMELIMIT: &str = "softtimelimit";
/// Key of the legacy limits map: hard CPU-time limit in seconds
pub const HARDTIMELIMIT: &str = "hardtimelimit";
/// Key of the legacy limits map: wall-time limit in seconds
pub const WALLTIMELIMIT: &str = "walltimelimit";
/// Key of the legacy limits map: memory limit in bytes
pub const MEMLIMIT: &str = "memlimit";
/// Key of the legacy limits map: number of CPU cores
pub const CORELIMIT: &str = "cpuCores";

/// Unstructured resource limits for legacy adapters.
///
/// Keys are only present if the limit applies, so check with `get()` or
/// `contains_key()` before using a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyLimits(BTreeMap<String, u64>);

impl LegacyLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: u64) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<&ResourceLimits> for LegacyLimits {
    fn from(rlimits: &ResourceLimits) -> Self {
        let mut limits = LegacyLimits::new();
        if let Some(cputime) = rlimits.cputime() {
            limits.insert(TIMELIMIT, cputime);
            limits.insert(SOFTTIMELIMIT, cputime);
        }
        if let Some(hard) = rlimits.cputime_hard() {
            limits.insert(HARDTIMELIMIT, hard);
        }
        if let Some(walltime) = rlimits.walltime() {
            limits.insert(WALLTIMELIMIT, walltime);
        }
        if let Some(memory) = rlimits.memory() {
            limits.insert(MEMLIMIT, memory);
        }
        if let Some(cores) = rlimits.cpu_cores() {
            limits.insert(CORELIMIT, cores);
        }
        limits
    }
}

/// Legacy adapter contract.
///
/// Differs from `ToolInfo` in `cmdline()` (flat list of input paths plus an
/// optional property file and a `LegacyLimits` map) and `determine_result()`
/// (separate return code and signal). Unlike `ToolInfo`, `name()` and
/// `executable()` have defaults here, but every real adapter overrides them.
///
/// Kept for existing adapters; support may be dropped in a later release.
pub trait LegacyToolInfo: Send + Sync {
    fn name(&self) -> &str {
        "UNKNOWN"
    }

    fn executable(&self, locator: &dyn ToolLocator) -> Result<PathBuf> {
        locator.find_executable("tool", None)
    }

    fn required_paths(&self) -> &[&str] {
        &[]
    }

    fn version(&self, _executable: &Path) -> String {
        String::new()
    }

    fn environment(&self, _executable: &Path) -> EnvironmentAdjustments {
        EnvironmentAdjustments::default()
    }

    fn program_files(&self, executable: &Path) -> Vec<PathBuf> {
        let mut files = vec![executable.to_path_buf()];
        files.extend(program_files_from_executable(
            executable,
            self.required_paths(),
            false,
        ));
        files
    }

    fn working_directory(&self, _executable: &Path) -> PathBuf {
        PathBuf::from(".")
    }

    /// Command line for one run: `[executable, *options, *tasks]` by default.
    ///
    /// `tasks` holds the input files of the run (usually one).
    fn cmdline(
        &self,
        executable: &Path,
        options: &[String],
        tasks: &[String],
        _property_file: Option<&str>,
        _rlimits: &LegacyLimits,
    ) -> Vec<String> {
        let mut cmd = vec![executable.display().to_string()];
        cmd.extend(options.iter().cloned());
        cmd.extend(tasks.iter().cloned());
        cmd
    }

    /// Classify a finished run.
    ///
    /// `returncode` is 0 if the program was killed, `returnsignal` is 0 if it
    /// exited on its own.
    fn determine_result(
        &self,
        _returncode: i32,
        _returnsignal: i32,
        _output: &[String],
        _is_timeout: bool,
    ) -> String {
        RESULT_DONE.to_string()
    }

    fn get_value_from_output(&self, _lines: &[String], _identifier: &str) -> Option<String> {
        None
    }
}
