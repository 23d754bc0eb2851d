// Domain Layer - Value objects handed to tool adapters

pub mod environment;
pub mod error;
pub mod exit_code;
pub mod outcome;
pub mod output;
pub mod program_files;
pub mod resource_limits;
pub mod task;

// Re-exports
pub use environment::EnvironmentAdjustments;
pub use error::DomainError;
pub use exit_code::ProcessExitCode;
pub use output::ToolOutput;
pub use resource_limits::{ResourceLimits, ResourceLimitsBuilder};
pub use task::Task;
