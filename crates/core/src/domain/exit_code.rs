// Process Exit Description
// How a finished tool process ended: normal exit or killed by a signal

use serde::{Deserialize, Serialize};

/// Structured exit status of a tool process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessExitCode {
    /// Process terminated on its own with the given exit value
    Exited(i32),
    /// Process was killed by the given signal
    Signaled(i32),
}

impl ProcessExitCode {
    /// Decode a POSIX wait status (signal in the low 7 bits, exit value in bits 8-15)
    pub fn from_raw(raw: i32) -> Self {
        let signal = raw & 0x7F;
        if signal == 0 {
            ProcessExitCode::Exited((raw >> 8) & 0xFF)
        } else {
            ProcessExitCode::Signaled(signal)
        }
    }

    /// Exit value, `None` if the process was killed
    pub fn value(&self) -> Option<i32> {
        match self {
            ProcessExitCode::Exited(code) => Some(*code),
            ProcessExitCode::Signaled(_) => None,
        }
    }

    /// Killing signal, `None` if the process exited itself
    pub fn signal(&self) -> Option<i32> {
        match self {
            ProcessExitCode::Exited(_) => None,
            ProcessExitCode::Signaled(signal) => Some(*signal),
        }
    }

    pub fn success(&self) -> bool {
        *self == ProcessExitCode::Exited(0)
    }
}

impl std::fmt::Display for ProcessExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessExitCode::Exited(code) => write!(f, "exit code {}", code),
            ProcessExitCode::Signaled(signal) => write!(f, "signal {}", signal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_exit() {
        let exit = ProcessExitCode::from_raw(1 << 8);

        assert_eq!(exit, ProcessExitCode::Exited(1));
        assert_eq!(exit.value(), Some(1));
        assert_eq!(exit.signal(), None);
    }

    #[test]
    fn test_from_raw_signal() {
        let exit = ProcessExitCode::from_raw(9);

        assert_eq!(exit, ProcessExitCode::Signaled(9));
        assert_eq!(exit.value(), None);
        assert_eq!(exit.signal(), Some(9));
        assert!(!exit.success());
    }

    #[test]
    fn test_display() {
        assert_eq!(ProcessExitCode::Exited(0).to_string(), "exit code 0");
        assert_eq!(ProcessExitCode::Signaled(11).to_string(), "signal 11");
    }
}
