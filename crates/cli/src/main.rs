//! Toolinfo CLI - inspect and drive tool adapters
//! Prints command lines, environments and result labels the way a harness would compute them

mod logging;
mod run_args;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::{debug, warn};

use toolinfo_core::application::{RunPlanner, ToolRegistry};
use toolinfo_core::domain::outcome::{RESULT_DONE, RESULT_FALSE_PROP, RESULT_TRUE_PROP};
use toolinfo_core::domain::{ProcessExitCode, ToolOutput};
use toolinfo_core::port::{ToolInfo, ToolLocator};
use toolinfo_core::AppError;
use toolinfo_infra_system::{signal_name, PathToolLocator};

use logging::LogFormat;
use run_args::{ambient_environment, LimitArgs, TaskArgs};

#[derive(Parser)]
#[command(name = "toolinfo")]
#[command(about = "Inspect and drive benchmarking tool adapters", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing the tool (searches $PATH and . if unset)
    #[arg(long, global = true, env = "TOOLINFO_TOOL_DIR")]
    tool_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, env = "TOOLINFO_LOG_FORMAT", value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered tools
    List,

    /// Show executable, version, program files and environment of a tool
    Info {
        /// Registry key of the tool
        tool: String,
    },

    /// Print the command line for one run
    Cmdline {
        /// Registry key of the tool
        tool: String,

        /// Tool option, repeat for several (order is kept)
        #[arg(short = 'o', long = "option", allow_hyphen_values = true)]
        options: Vec<String>,

        #[command(flatten)]
        task: TaskArgs,

        #[command(flatten)]
        limits: LimitArgs,

        /// Print the invocation (environment adjustments, working directory) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a finished run
    Classify {
        /// Registry key of the tool
        tool: String,

        /// Exit code of the run
        #[arg(long, allow_hyphen_values = true, required_unless_present = "signal", conflicts_with = "signal")]
        exit_code: Option<i32>,

        /// Signal that killed the run
        #[arg(long)]
        signal: Option<i32>,

        /// The run was killed because of a time limit
        #[arg(long)]
        timeout: bool,

        /// File with the captured output of the run
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Show versions of all registered tools
    Versions,
}

#[derive(Tabled)]
struct ToolRow {
    key: String,
    name: String,
    executable: String,
}

#[derive(Tabled)]
struct VersionRow {
    tool: String,
    version: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format)?;

    let registry = toolinfo_tools::default_registry().context("Failed to load tool adapters")?;
    let locator: Arc<dyn ToolLocator> = Arc::new(PathToolLocator::new(cli.tool_dir.clone()));
    debug!(tools = registry.len(), tool_dir = ?cli.tool_dir, "Loaded tool registry");

    match cli.command {
        Commands::List => {
            let rows: Vec<ToolRow> = registry
                .iter()
                .map(|(key, tool)| ToolRow {
                    key: key.to_string(),
                    name: tool.name().to_string(),
                    executable: match tool.executable(locator.as_ref()) {
                        Ok(path) => path.display().to_string(),
                        Err(_) => "(not found)".to_string(),
                    },
                })
                .collect();

            println!("{}", Table::new(rows));
        }

        Commands::Info { tool } => {
            let tool = registry.get(&tool)?;
            let planner = RunPlanner::new(locator);
            let executable = planner.resolve_executable(tool.as_ref())?;

            print_info(tool.as_ref(), &executable)?;
        }

        Commands::Cmdline {
            tool,
            options,
            task,
            limits,
            json,
        } => {
            let tool = registry.get(&tool)?;
            let task = task.to_task()?;
            let rlimits = limits.to_limits()?;
            let planner = RunPlanner::new(locator);

            let invocation = planner
                .plan(tool.as_ref(), &options, &task, &rlimits, ambient_environment())
                .map_err(|e| configuration_error(tool.name(), e))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&invocation)?);
            } else {
                println!("{}", invocation.cmdline.join(" "));
            }
        }

        Commands::Classify {
            tool,
            exit_code,
            signal,
            timeout,
            output_file,
        } => {
            let tool = registry.get(&tool)?;
            let exit_code = match (exit_code, signal) {
                (_, Some(signal)) => ProcessExitCode::Signaled(signal),
                (Some(code), None) => ProcessExitCode::Exited(code),
                (None, None) => anyhow::bail!("either --exit-code or --signal is required"),
            };
            let output = match output_file {
                Some(path) => read_output(&path)?,
                None => ToolOutput::default(),
            };

            let planner = RunPlanner::new(locator);
            let classification = planner.classify(tool.as_ref(), &exit_code, &output, timeout);

            println!("  {} {}", "Exit:".bold(), describe_exit(&exit_code));
            println!("  {} {}", "Tool result:".bold(), classification.tool_result);
            println!("  {} {}", "Status:".bold(), colorize_status(&classification.status));
        }

        Commands::Versions => {
            let rows = probe_versions(&registry, locator).await;
            println!("{}", Table::new(rows));
        }
    }

    Ok(())
}

fn print_info(tool: &dyn ToolInfo, executable: &Path) -> Result<()> {
    let version = tool.version(executable);
    let environment = tool.environment(executable);

    println!("{}", tool.name().cyan().bold());
    println!();
    println!("  {} {}", "Executable:".bold(), executable.display());
    println!(
        "  {} {}",
        "Version:".bold(),
        if version.is_empty() {
            "(unknown)".yellow().to_string()
        } else {
            version
        }
    );
    println!(
        "  {} {}",
        "Working directory:".bold(),
        tool.working_directory(executable).display()
    );
    println!("  {}", "Program files:".bold());
    for path in tool.program_files(executable) {
        println!("    {}", path.display());
    }
    println!(
        "  {} {}",
        "Environment:".bold(),
        serde_json::to_string(&environment)?
    );
    Ok(())
}

/// Versions of all tools, each probed on its own blocking thread
async fn probe_versions(registry: &ToolRegistry, locator: Arc<dyn ToolLocator>) -> Vec<VersionRow> {
    let handles: Vec<_> = registry
        .iter()
        .map(|(key, tool)| {
            let key = key.to_string();
            let tool = Arc::clone(tool);
            let locator = Arc::clone(&locator);
            let handle = tokio::task::spawn_blocking(move || {
                tool.executable(locator.as_ref())
                    .map(|executable| tool.version(&executable))
            });
            (key, handle)
        })
        .collect();

    let mut rows = Vec::with_capacity(handles.len());
    for (key, handle) in handles {
        let version = match handle.await {
            Ok(Ok(version)) if !version.is_empty() => version,
            Ok(Ok(_)) => "(unknown)".to_string(),
            Ok(Err(e)) => {
                warn!(tool = %key, error = %e, "Cannot locate tool");
                "(not found)".to_string()
            }
            Err(e) => {
                warn!(tool = %key, error = %e, "Version probe task failed");
                "(error)".to_string()
            }
        };
        rows.push(VersionRow { tool: key, version });
    }
    rows
}

/// Tasks a tool cannot handle are a configuration problem, not a crash
fn configuration_error(tool_name: &str, error: AppError) -> anyhow::Error {
    if error.is_unsupported_feature() {
        anyhow::anyhow!(
            "Configuration error: {} cannot run this task ({})",
            tool_name,
            error
        )
    } else {
        anyhow::Error::new(error)
    }
}

fn read_output(path: &Path) -> Result<ToolOutput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read output file {}", path.display()))?;
    Ok(ToolOutput::from_text(&text))
}

fn describe_exit(exit_code: &ProcessExitCode) -> String {
    match exit_code.signal().and_then(signal_name) {
        Some(name) => format!("{} ({})", exit_code, name),
        None => exit_code.to_string(),
    }
}

fn colorize_status(status: &str) -> colored::ColoredString {
    match status {
        RESULT_TRUE_PROP | RESULT_DONE => status.green(),
        RESULT_FALSE_PROP => status.yellow(),
        _ => status.red(),
    }
}
