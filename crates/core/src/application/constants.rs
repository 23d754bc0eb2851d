// Harness constants (no magic values)

/// Argument passed to a tool to make it print its version
pub const DEFAULT_VERSION_ARG: &str = "--version";

/// POSIX signal numbers the harness reports specially
pub const SIGABRT: i32 = 6;
pub const SIGSEGV: i32 = 11;

/// Status shown when a tool died from SIGSEGV
pub const STATUS_SEGMENTATION_FAULT: &str = "SEGMENTATION FAULT";

/// Status shown when a tool died from SIGABRT
pub const STATUS_ABORTED: &str = "ABORTED";

/// Prefix of the status shown for any other killing signal
pub const STATUS_KILLED_BY_SIGNAL: &str = "KILLED BY SIGNAL";
