// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A tool (or its adapter) cannot handle the requested feature,
    /// e.g. a task defined without input files.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Invalid resource limits: {0}")]
    InvalidResourceLimits(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
