// Run planning
// Drives one adapter from executable lookup to command line, and classifies results

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::reconcile::reconcile_outcome;
use crate::domain::outcome::RESULT_ERROR;
use crate::domain::{EnvironmentAdjustments, ProcessExitCode, ResourceLimits, Task, ToolOutput};
use crate::error::{AppError, Result};
use crate::port::{ToolInfo, ToolLocator};

/// Everything the execution engine needs to start one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunInvocation {
    pub tool_name: String,
    pub executable: PathBuf,
    pub cmdline: Vec<String>,
    /// Final environment of the run. Not serialized, it carries the caller's
    /// whole environment.
    #[serde(skip)]
    pub environment: BTreeMap<String, String>,
    pub environment_adjustments: EnvironmentAdjustments,
    pub working_directory: PathBuf,
}

/// Classification of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunClassification {
    /// Label returned by the adapter
    pub tool_result: String,
    /// Final status after the harness's own checks (timeouts, signals)
    pub status: String,
}

/// Drives tool adapters for the harness.
///
/// Holds no per-run state, one planner serves any number of runs.
pub struct RunPlanner {
    locator: Arc<dyn ToolLocator>,
}

impl RunPlanner {
    pub fn new(locator: Arc<dyn ToolLocator>) -> Self {
        Self { locator }
    }

    /// Find the executable of `tool`
    pub fn resolve_executable(&self, tool: &dyn ToolInfo) -> Result<PathBuf> {
        let executable = tool.executable(self.locator.as_ref())?;
        debug!(tool = %tool.name(), executable = %executable.display(), "Resolved executable");
        Ok(executable)
    }

    /// Build the invocation of `tool` for one run.
    ///
    /// `ambient_env` is the environment the run would inherit; the tool's
    /// environment adjustments are applied to it.
    ///
    /// # Errors
    /// - AppError::ToolNotFound if the executable cannot be located
    /// - AppError::Domain(UnsupportedFeature) if the tool cannot handle `task`
    /// - AppError::Internal if the tool produced an empty command line
    pub fn plan<I>(
        &self,
        tool: &dyn ToolInfo,
        options: &[String],
        task: &Task,
        rlimits: &ResourceLimits,
        ambient_env: I,
    ) -> Result<RunInvocation>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let executable = self.resolve_executable(tool)?;

        let cmdline = tool
            .cmdline(&executable, options, task, rlimits)
            .inspect_err(|e| {
                warn!(tool = %tool.name(), error = %e, "Cannot build command line");
            })?;
        if cmdline.is_empty() {
            return Err(AppError::Internal(format!(
                "tool '{}' returned an empty command line",
                tool.name()
            )));
        }

        let environment_adjustments = tool.environment(&executable);
        let environment = environment_adjustments.apply(ambient_env);
        let working_directory = tool.working_directory(&executable);

        info!(
            tool = %tool.name(),
            cmdline = ?cmdline,
            working_directory = %working_directory.display(),
            "Planned run"
        );

        Ok(RunInvocation {
            tool_name: tool.name().to_string(),
            executable,
            cmdline,
            environment,
            environment_adjustments,
            working_directory,
        })
    }

    /// Classify a finished run: ask the tool, then apply the harness's checks
    pub fn classify(
        &self,
        tool: &dyn ToolInfo,
        exit_code: &ProcessExitCode,
        output: &ToolOutput,
        is_timeout: bool,
    ) -> RunClassification {
        let mut tool_result = tool.determine_result(exit_code, output.lines(), is_timeout);
        if tool_result.trim().is_empty() {
            warn!(tool = %tool.name(), "Tool returned an empty result label");
            tool_result = RESULT_ERROR.to_string();
        }

        let status = reconcile_outcome(&tool_result, exit_code, is_timeout);

        info!(
            tool = %tool.name(),
            exit_code = %exit_code,
            is_timeout = is_timeout,
            tool_result = %tool_result,
            status = %status,
            "Classified run"
        );

        RunClassification {
            tool_result,
            status,
        }
    }
}
