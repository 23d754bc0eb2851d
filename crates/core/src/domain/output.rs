// Captured Tool Output

use serde::{Deserialize, Serialize};

/// Output of a tool run (stdout and stderr interleaved) as ordered lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput(Vec<String>);

impl ToolOutput {
    pub fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }

    /// Split captured text into lines (trailing line breaks dropped)
    pub fn from_text(text: &str) -> Self {
        Self(text.lines().map(str::to_string).collect())
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn any_line_contains(&self, needle: &str) -> bool {
        self.0.iter().any(|line| line.contains(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<String>> for ToolOutput {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}
