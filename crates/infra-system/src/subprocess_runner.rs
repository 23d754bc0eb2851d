// Subprocess runner implementation
// Spawns a short-lived child process and captures stdout/stderr separately
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use tracing::{debug, info};

use toolinfo_core::application::{VersionProbe, VersionQuery};
use toolinfo_core::domain::ProcessExitCode;
use toolinfo_core::port::{CapturedOutput, CommandRunner, ExecutionError};

/// Blocking subprocess runner.
///
/// Stdin is closed, stdout and stderr are piped. There is no timeout: the call
/// returns once the child exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SubprocessRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CapturedOutput, ExecutionError> {
        debug!(program = %program.display(), args = ?args, "Starting subprocess");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ExecutionError::SpawnFailed {
                program: program.display().to_string(),
                reason: e.to_string(),
            })?;

        let exit_code = exit_code_from_status(output.status)?;

        info!(
            program = %program.display(),
            exit_code = %exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Subprocess completed"
        );

        Ok(CapturedOutput {
            exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Convert a std exit status into the structured exit description
pub fn exit_code_from_status(status: ExitStatus) -> Result<ProcessExitCode, ExecutionError> {
    if let Some(code) = status.code() {
        return Ok(ProcessExitCode::Exited(code));
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return Ok(ProcessExitCode::Signaled(signal));
        }
    }

    Err(ExecutionError::Io(format!(
        "process ended without exit code or signal: {:?}",
        status
    )))
}

/// Version of the tool at `executable`, or `""` if it cannot be determined.
///
/// Meant for `ToolInfo::version()` implementations:
/// ```ignore
/// fn version(&self, executable: &Path) -> String {
///     version_from_tool(executable, &VersionQuery::new().arg("-v"))
/// }
/// ```
pub fn version_from_tool(executable: &Path, query: &VersionQuery) -> String {
    VersionProbe::new(Arc::new(SubprocessRunner)).version_from_tool(executable, query)
}
