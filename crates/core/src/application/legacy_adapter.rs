// Legacy adapter
// Lets a harness drive a LegacyToolInfo through the current ToolInfo contract

use std::path::{Path, PathBuf};

use crate::domain::{EnvironmentAdjustments, ProcessExitCode, ResourceLimits, Task};
use crate::error::Result;
use crate::port::{LegacyLimits, LegacyToolInfo, ToolInfo, ToolLocator};

/// Wraps a legacy adapter so it can be selected like any current one.
///
/// Tasks are passed on as their input files (legacy adapters cannot handle
/// tasks without files), resource limits as a `LegacyLimits` map and the exit
/// code as separate return code and signal.
pub struct LegacyToolAdapter<T> {
    inner: T,
}

impl<T: LegacyToolInfo> LegacyToolAdapter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: LegacyToolInfo> ToolInfo for LegacyToolAdapter<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn executable(&self, locator: &dyn ToolLocator) -> Result<PathBuf> {
        self.inner.executable(locator)
    }

    fn required_paths(&self) -> &[&str] {
        self.inner.required_paths()
    }

    fn version(&self, executable: &Path) -> String {
        self.inner.version(executable)
    }

    fn environment(&self, executable: &Path) -> EnvironmentAdjustments {
        self.inner.environment(executable)
    }

    fn program_files(&self, executable: &Path) -> Vec<PathBuf> {
        self.inner.program_files(executable)
    }

    fn working_directory(&self, executable: &Path) -> PathBuf {
        self.inner.working_directory(executable)
    }

    fn cmdline(
        &self,
        executable: &Path,
        options: &[String],
        task: &Task,
        rlimits: &ResourceLimits,
    ) -> Result<Vec<String>> {
        let input_files = task.input_files()?;
        Ok(self.inner.cmdline(
            executable,
            options,
            input_files,
            task.property_file(),
            &LegacyLimits::from(rlimits),
        ))
    }

    fn determine_result(
        &self,
        exit_code: &ProcessExitCode,
        output: &[String],
        is_timeout: bool,
    ) -> String {
        self.inner.determine_result(
            exit_code.value().unwrap_or(0),
            exit_code.signal().unwrap_or(0),
            output,
            is_timeout,
        )
    }

    fn get_value_from_output(&self, lines: &[String], identifier: &str) -> Option<String> {
        self.inner.get_value_from_output(lines, identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::legacy_tool_info::{HARDTIMELIMIT, MEMLIMIT, WALLTIMELIMIT};
    use crate::port::tool_locator::mocks::MockToolLocator;

    struct OldChecker;

    impl LegacyToolInfo for OldChecker {
        fn name(&self) -> &str {
            "Old Checker"
        }

        fn executable(&self, locator: &dyn ToolLocator) -> Result<PathBuf> {
            locator.find_executable("oldchecker", None)
        }

        fn cmdline(
            &self,
            executable: &Path,
            options: &[String],
            tasks: &[String],
            property_file: Option<&str>,
            rlimits: &LegacyLimits,
        ) -> Vec<String> {
            let mut cmd = vec![executable.display().to_string()];
            cmd.extend(options.iter().cloned());
            if let Some(seconds) = rlimits.get(HARDTIMELIMIT) {
                cmd.push(format!("--timeout={}", seconds));
            }
            if rlimits.contains_key(WALLTIMELIMIT) {
                cmd.push("--wall".to_string());
            }
            if let Some(bytes) = rlimits.get(MEMLIMIT) {
                cmd.push(format!("--heap={}", bytes / 1_000_000));
            }
            if let Some(prp) = property_file {
                cmd.push(format!("--spec={}", prp));
            }
            cmd.extend(tasks.iter().cloned());
            cmd
        }

        fn determine_result(
            &self,
            returncode: i32,
            returnsignal: i32,
            _output: &[String],
            _is_timeout: bool,
        ) -> String {
            format!("code={} signal={}", returncode, returnsignal)
        }
    }

    #[test]
    fn test_delegates_name_and_executable() {
        let adapter = LegacyToolAdapter::new(OldChecker);
        let locator = MockToolLocator::new().with("oldchecker", "/opt/old/oldchecker");

        assert_eq!(adapter.name(), "Old Checker");
        assert_eq!(
            adapter.executable(&locator).unwrap(),
            PathBuf::from("/opt/old/oldchecker")
        );
    }

    #[test]
    fn test_cmdline_translates_task_and_limits() {
        let adapter = LegacyToolAdapter::new(OldChecker);
        let task = Task::with_files(["prog.c"])
            .unwrap()
            .with_property_file("unreach.prp");
        let rlimits = ResourceLimits::builder()
            .cputime(100, 110)
            .memory(2_000_000_000)
            .build()
            .unwrap();

        let cmd = adapter
            .cmdline(Path::new("old"), &["-q".to_string()], &task, &rlimits)
            .unwrap();

        assert_eq!(
            cmd,
            vec!["old", "-q", "--timeout=110", "--heap=2000", "--spec=unreach.prp", "prog.c"]
        );
    }

    #[test]
    fn test_cmdline_rejects_task_without_files() {
        let adapter = LegacyToolAdapter::new(OldChecker);
        let task = Task::without_files("id").unwrap();

        let err = adapter
            .cmdline(Path::new("old"), &[], &task, &ResourceLimits::unlimited())
            .unwrap_err();

        assert!(err.is_unsupported_feature());
    }

    #[test]
    fn test_determine_result_splits_exit_code() {
        let adapter = LegacyToolAdapter::new(OldChecker);

        assert_eq!(
            adapter.determine_result(&ProcessExitCode::Exited(3), &[], false),
            "code=3 signal=0"
        );
        assert_eq!(
            adapter.determine_result(&ProcessExitCode::Signaled(9), &[], true),
            "code=0 signal=9"
        );
    }
}
