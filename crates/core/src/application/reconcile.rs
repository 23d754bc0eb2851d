// Outcome reconciliation
// The harness's own view on a run, applied on top of the adapter's label

use crate::application::constants::{
    SIGABRT, SIGSEGV, STATUS_ABORTED, STATUS_KILLED_BY_SIGNAL, STATUS_SEGMENTATION_FAULT,
};
use crate::domain::outcome::{is_verdict, RESULT_DONE, RESULT_ERROR, RESULT_TIMEOUT};
use crate::domain::ProcessExitCode;

/// Final status of a run from the adapter's label and what the harness saw.
///
/// - timeout: `TIMEOUT`, or `TIMEOUT (<verdict>)` if the tool still reported
///   a true/false verdict
/// - killed by a signal without a verdict: `SEGMENTATION FAULT`, `ABORTED`
///   or `KILLED BY SIGNAL <n>`
/// - non-zero exit while the tool said only `done`: `ERROR (<code>)`
/// - otherwise the adapter's label, or `ERROR` if it was empty
pub fn reconcile_outcome(tool_label: &str, exit_code: &ProcessExitCode, is_timeout: bool) -> String {
    let tool_label = tool_label.trim();

    if is_timeout {
        return if is_verdict(tool_label) {
            format!("{} ({})", RESULT_TIMEOUT, tool_label)
        } else {
            RESULT_TIMEOUT.to_string()
        };
    }

    match exit_code {
        ProcessExitCode::Signaled(signal) if !is_verdict(tool_label) => match *signal {
            SIGSEGV => STATUS_SEGMENTATION_FAULT.to_string(),
            SIGABRT => STATUS_ABORTED.to_string(),
            other => format!("{} {}", STATUS_KILLED_BY_SIGNAL, other),
        },
        ProcessExitCode::Exited(code) if *code != 0 && tool_label == RESULT_DONE => {
            format!("{} ({})", RESULT_ERROR, code)
        }
        _ if tool_label.is_empty() => RESULT_ERROR.to_string(),
        _ => tool_label.to_string(),
    }
}
