// Toolinfo Infrastructure - System Adapters
// Implements: CommandRunner, ToolLocator

pub mod signals;
pub mod subprocess_runner;
pub mod tool_locator_impl;

pub use signals::signal_name;
pub use subprocess_runner::{exit_code_from_status, version_from_tool, SubprocessRunner};
pub use tool_locator_impl::PathToolLocator;
