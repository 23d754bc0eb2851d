// Outcome Labels
// Fixed vocabulary an adapter picks from when classifying a run

/// The tool finished and produced no true/false verdict
pub const RESULT_DONE: &str = "done";

/// The tool gave up without a verdict
pub const RESULT_UNKNOWN: &str = "unknown";

/// The tool reported an error
pub const RESULT_ERROR: &str = "ERROR";

/// The tool ran out of time
pub const RESULT_TIMEOUT: &str = "TIMEOUT";

/// The tool ran out of memory
pub const RESULT_OUT_OF_MEMORY: &str = "OUT OF MEMORY";

/// The property holds
pub const RESULT_TRUE_PROP: &str = "true";

/// The property is violated
pub const RESULT_FALSE_PROP: &str = "false";

/// All standard labels
pub const STANDARD_LABELS: &[&str] = &[
    RESULT_DONE,
    RESULT_UNKNOWN,
    RESULT_ERROR,
    RESULT_TIMEOUT,
    RESULT_OUT_OF_MEMORY,
    RESULT_TRUE_PROP,
    RESULT_FALSE_PROP,
];

/// True if `label` is one of the standard labels.
///
/// Labels like `false(unreach-call)` count as standard: the part before the
/// parenthesis decides.
pub fn is_standard_label(label: &str) -> bool {
    let head = label.split('(').next().unwrap_or(label).trim();
    STANDARD_LABELS.contains(&head)
}

/// True if `label` is a verdict about the checked property (true/false)
pub fn is_verdict(label: &str) -> bool {
    let head = label.split('(').next().unwrap_or(label).trim();
    head == RESULT_TRUE_PROP || head == RESULT_FALSE_PROP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_labels() {
        assert!(is_standard_label(RESULT_DONE));
        assert!(is_standard_label("false(unreach-call)"));
        assert!(!is_standard_label("CRASH"));
    }

    #[test]
    fn test_verdicts() {
        assert!(is_verdict("true"));
        assert!(is_verdict("false(valid-memsafety)"));
        assert!(!is_verdict(RESULT_DONE));
        assert!(!is_verdict(RESULT_ERROR));
    }
}
