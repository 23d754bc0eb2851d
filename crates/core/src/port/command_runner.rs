// Command Runner Port
// Runs a short-lived helper command (e.g. `tool --version`) and captures its output

use std::path::Path;
use thiserror::Error;

use crate::domain::ProcessExitCode;

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub exit_code: ProcessExitCode,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Cannot run {program}: {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("IO error: {0}")]
    Io(String),
}

/// Command runner trait
///
/// Implementations:
/// - SubprocessRunner (toolinfo-infra-system): spawns the program and waits
/// - MockCommandRunner: canned output for tests
///
/// Runs block until the command exits, there is no timeout.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, stdout and stderr captured separately
    ///
    /// # Errors
    /// - ExecutionError::SpawnFailed if the program cannot be started
    /// - ExecutionError::Io if reading its output fails
    fn run(&self, program: &Path, args: &[String]) -> Result<CapturedOutput, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Exit with the given code and output
        Output {
            exit_code: ProcessExitCode,
            stdout: String,
            stderr: String,
        },
        /// Fail to start the program
        SpawnFail(String),
    }

    /// Mock Command Runner for testing
    pub struct MockCommandRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl MockCommandRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_stdout(stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output {
                exit_code: ProcessExitCode::Exited(0),
                stdout: stdout.into(),
                stderr: String::new(),
            })
        }
        pub fn new_stderr(stderr: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output {
                exit_code: ProcessExitCode::Exited(0),
                stdout: String::new(),
                stderr: stderr.into(),
            })
        }
        pub fn new_exit(code: i32, stdout: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output {
                exit_code: ProcessExitCode::Exited(code),
                stdout: stdout.into(),
                stderr: String::new(),
            })
        }
        pub fn new_spawn_fail(reason: impl Into<String>) -> Self {
            Self::new(MockBehavior::SpawnFail(reason.into()))
        }
        /// Command lines seen so far (program first)
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for MockCommandRunner {
        fn run(&self, program: &Path, args: &[String]) -> Result<CapturedOutput, ExecutionError> {
            let mut call = vec![program.display().to_string()];
            call.extend(args.iter().cloned());
            self.calls.lock().unwrap().push(call);

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Output {
                    exit_code,
                    stdout,
                    stderr,
                } => Ok(CapturedOutput {
                    exit_code,
                    stdout: stdout.into_bytes(),
                    stderr: stderr.into_bytes(),
                }),
                MockBehavior::SpawnFail(reason) => Err(ExecutionError::SpawnFailed {
                    program: program.display().to_string(),
                    reason,
                }),
            }
        }
    }
}
