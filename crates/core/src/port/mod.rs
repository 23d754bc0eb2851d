// Port Layer - The adapter contract and interfaces for external dependencies

pub mod command_runner;
pub mod legacy_tool_info;
pub mod tool_info;
pub mod tool_locator;

// Re-exports
pub use command_runner::{CapturedOutput, CommandRunner, ExecutionError};
pub use legacy_tool_info::{LegacyLimits, LegacyToolInfo};
pub use tool_info::ToolInfo;
pub use tool_locator::ToolLocator;
