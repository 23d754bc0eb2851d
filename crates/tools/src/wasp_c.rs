// WASP-C adapter
// Concolic execution tool for C programs (https://github.com/wasp-platform/wasp)

use std::path::{Path, PathBuf};

use toolinfo_core::application::VersionQuery;
use toolinfo_core::domain::outcome::{RESULT_DONE, RESULT_ERROR, RESULT_TIMEOUT, RESULT_UNKNOWN};
use toolinfo_core::domain::{DomainError, ProcessExitCode, ResourceLimits, Task};
use toolinfo_core::port::{ToolInfo, ToolLocator};
use toolinfo_core::Result;
use toolinfo_infra_system::version_from_tool;

#[derive(Debug, Default, Clone, Copy)]
pub struct WaspC;

impl ToolInfo for WaspC {
    fn name(&self) -> &str {
        "WASP-C"
    }

    fn executable(&self, locator: &dyn ToolLocator) -> Result<PathBuf> {
        locator.find_executable("wasp-c", Some("bin"))
    }

    fn version(&self, executable: &Path) -> String {
        version_from_tool(executable, &VersionQuery::new().arg("-v"))
    }

    fn cmdline(
        &self,
        executable: &Path,
        options: &[String],
        task: &Task,
        _rlimits: &ResourceLimits,
    ) -> Result<Vec<String>> {
        let property_file = task.property_file().ok_or_else(|| {
            DomainError::UnsupportedFeature("property file is required".to_string())
        })?;
        let input_file = task.single_input_file()?;

        let mut cmd = vec![executable.display().to_string()];
        cmd.extend(options.iter().cloned());
        cmd.push("--property".to_string());
        cmd.push(property_file.to_string());
        cmd.push(input_file.to_string());
        Ok(cmd)
    }

    fn determine_result(
        &self,
        exit_code: &ProcessExitCode,
        output: &[String],
        is_timeout: bool,
    ) -> String {
        let contains = |needle: &str| output.iter().any(|line| line.contains(needle));

        let label = if exit_code.value() == Some(1)
            || contains("Failed to")
            || contains("WASP crashed")
        {
            RESULT_ERROR
        } else if is_timeout || contains("WASP timed out") {
            RESULT_TIMEOUT
        } else if exit_code.signal().is_some() {
            RESULT_UNKNOWN
        } else if exit_code.value() == Some(0) && contains("Analysis done.") {
            RESULT_DONE
        } else {
            RESULT_UNKNOWN
        };
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolinfo_core::port::tool_locator::mocks::MockToolLocator;
    use toolinfo_core::AppError;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_executable() {
        let locator = MockToolLocator::new().with("wasp-c", "tools/wasp/bin/wasp-c");

        assert_eq!(
            WaspC.executable(&locator).unwrap(),
            PathBuf::from("tools/wasp/bin/wasp-c")
        );
    }

    #[test]
    fn test_cmdline() {
        let task = Task::with_files(["prog.c"])
            .unwrap()
            .with_property_file("unreach-call.prp");

        let cmd = WaspC
            .cmdline(
                Path::new("bin/wasp-c"),
                &["--timeout".to_string(), "900".to_string()],
                &task,
                &ResourceLimits::unlimited(),
            )
            .unwrap();

        assert_eq!(
            cmd,
            vec![
                "bin/wasp-c",
                "--timeout",
                "900",
                "--property",
                "unreach-call.prp",
                "prog.c"
            ]
        );
    }

    #[test]
    fn test_cmdline_requires_property_file() {
        let task = Task::with_files(["prog.c"]).unwrap();

        let err = WaspC
            .cmdline(Path::new("wasp-c"), &[], &task, &ResourceLimits::unlimited())
            .unwrap_err();

        assert!(err.is_unsupported_feature());
        assert!(err.to_string().contains("property file is required"));
    }

    #[test]
    fn test_cmdline_rejects_multiple_files() {
        let task = Task::with_files(["a.c", "b.c"])
            .unwrap()
            .with_property_file("p.prp");

        let result = WaspC.cmdline(Path::new("wasp-c"), &[], &task, &ResourceLimits::unlimited());

        assert!(matches!(result, Err(AppError::Domain(DomainError::UnsupportedFeature(_)))));
    }

    #[test]
    fn test_determine_result() {
        let ok = ProcessExitCode::Exited(0);

        assert_eq!(
            WaspC.determine_result(&ok, &lines(&["Analysis done."]), false),
            RESULT_DONE
        );
        assert_eq!(
            WaspC.determine_result(&ProcessExitCode::Exited(1), &lines(&["Analysis done."]), false),
            RESULT_ERROR
        );
        assert_eq!(
            WaspC.determine_result(&ok, &lines(&["WASP crashed: oops"]), false),
            RESULT_ERROR
        );
        assert_eq!(
            WaspC.determine_result(&ok, &lines(&["Failed to parse"]), true),
            RESULT_ERROR
        );
        assert_eq!(
            WaspC.determine_result(&ok, &lines(&["WASP timed out"]), false),
            RESULT_TIMEOUT
        );
        assert_eq!(
            WaspC.determine_result(&ProcessExitCode::Signaled(9), &[], true),
            RESULT_TIMEOUT
        );
        assert_eq!(
            WaspC.determine_result(&ProcessExitCode::Signaled(9), &lines(&["Analysis done."]), false),
            RESULT_UNKNOWN
        );
        assert_eq!(WaspC.determine_result(&ok, &[], false), RESULT_UNKNOWN);
    }
}
