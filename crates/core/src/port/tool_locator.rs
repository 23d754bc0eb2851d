// Tool Locator Port
// Finds the executable of a tool on this machine

use std::path::PathBuf;

use crate::error::Result;

/// Locates tool executables for `ToolInfo::executable`
pub trait ToolLocator: Send + Sync {
    /// Find the executable `name`, optionally inside sub-directory `subdir`
    /// of the configured tool directory.
    ///
    /// # Errors
    /// AppError::ToolNotFound if no executable file with this name exists
    fn find_executable(&self, name: &str, subdir: Option<&str>) -> Result<PathBuf>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;

    /// Mock ToolLocator resolving from a fixed table
    #[derive(Default)]
    pub struct MockToolLocator {
        executables: HashMap<String, PathBuf>,
    }

    impl MockToolLocator {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn with(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
            self.executables.insert(name.into(), path.into());
            self
        }
    }

    impl ToolLocator for MockToolLocator {
        fn find_executable(&self, name: &str, _subdir: Option<&str>) -> Result<PathBuf> {
            self.executables
                .get(name)
                .cloned()
                .ok_or_else(|| AppError::ToolNotFound(name.to_string()))
        }
    }
}
