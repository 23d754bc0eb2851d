// Signal names for human-readable run reports

/// Symbolic name of signal `number` (e.g. "SIGSEGV"), if known on this platform
#[cfg(unix)]
pub fn signal_name(number: i32) -> Option<&'static str> {
    use nix::sys::signal::Signal;

    Signal::try_from(number).ok().map(Signal::as_str)
}

#[cfg(not(unix))]
pub fn signal_name(_number: i32) -> Option<&'static str> {
    None
}
