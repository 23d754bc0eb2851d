// Run arguments
// Task and resource-limit flags shared by commands that plan a run

use anyhow::{Context, Result};
use clap::Args;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use toolinfo_core::domain::{ResourceLimits, Task};

#[derive(Debug, Clone, Default, Args)]
pub struct TaskArgs {
    /// Input files of the task
    pub input_files: Vec<String>,

    /// Identifier for tasks without input files
    #[arg(long, conflicts_with = "input_files")]
    pub identifier: Option<String>,

    /// Property file to check
    #[arg(long)]
    pub property_file: Option<String>,

    /// Task options as JSON object
    #[arg(long)]
    pub task_options: Option<String>,
}

impl TaskArgs {
    pub fn to_task(&self) -> Result<Task> {
        let mut task = Task::new(self.input_files.iter(), self.identifier.clone())
            .context("Invalid task")?;

        if let Some(property_file) = &self.property_file {
            task = task.with_property_file(property_file);
        }
        if let Some(raw) = &self.task_options {
            let options: serde_json::Value =
                serde_json::from_str(raw).context("Invalid JSON in --task-options")?;
            task = task.with_options(&options);
        }
        Ok(task)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct LimitArgs {
    /// Load limits from a JSON file (keys: cputime, cputime_hard, walltime, memory, cpu_cores)
    #[arg(long, conflicts_with_all = ["cputime", "cputime_hard", "walltime", "memory", "cpu_cores"])]
    pub limits_file: Option<PathBuf>,

    /// Soft CPU-time limit in seconds
    #[arg(long)]
    pub cputime: Option<u64>,

    /// Hard CPU-time limit in seconds (default: the soft limit)
    #[arg(long, requires = "cputime")]
    pub cputime_hard: Option<u64>,

    /// Wall-time limit in seconds
    #[arg(long)]
    pub walltime: Option<u64>,

    /// Memory limit in bytes
    #[arg(long)]
    pub memory: Option<u64>,

    /// Number of CPU cores
    #[arg(long)]
    pub cpu_cores: Option<u64>,
}

impl LimitArgs {
    pub fn to_limits(&self) -> Result<ResourceLimits> {
        if let Some(path) = &self.limits_file {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("Invalid resource limits in {}", path.display()));
        }

        let mut builder = ResourceLimits::builder();
        if let Some(soft) = self.cputime {
            builder = builder.cputime(soft, self.cputime_hard.unwrap_or(soft));
        }
        if let Some(walltime) = self.walltime {
            builder = builder.walltime(walltime);
        }
        if let Some(memory) = self.memory {
            builder = builder.memory(memory);
        }
        if let Some(cores) = self.cpu_cores {
            builder = builder.cpu_cores(cores);
        }
        builder.build().context("Invalid resource limits")
    }
}

/// Environment of this process, as inherited by a planned run
pub fn ambient_environment() -> Vec<(String, String)> {
    utf8_environment(std::env::vars_os())
}

/// Keep the UTF-8 variables; others cannot reach a command line and are skipped
pub fn utf8_environment<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => Some((name, value)),
            (Ok(name), Err(_)) => {
                warn!(name = %name, "Skipping environment variable with non-UTF-8 value");
                None
            }
            (Err(name), _) => {
                warn!(name = %name.to_string_lossy(), "Skipping environment variable with non-UTF-8 name");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_task_from_files() {
        let args = TaskArgs {
            input_files: vec!["a.c".to_string()],
            property_file: Some("p.prp".to_string()),
            task_options: Some(r#"{"language": "C"}"#.to_string()),
            ..Default::default()
        };

        let task = args.to_task().unwrap();

        assert_eq!(task.input_files().unwrap(), ["a.c".to_string()]);
        assert_eq!(task.property_file(), Some("p.prp"));
        assert_eq!(task.options().unwrap()["language"], "C");
    }

    #[test]
    fn test_task_needs_files_or_identifier() {
        assert!(TaskArgs::default().to_task().is_err());
    }

    #[test]
    fn test_task_rejects_bad_json() {
        let args = TaskArgs {
            identifier: Some("t1".to_string()),
            task_options: Some("{not json".to_string()),
            ..Default::default()
        };

        assert!(args.to_task().is_err());
    }

    #[test]
    fn test_limits_hard_defaults_to_soft() {
        let args = LimitArgs {
            cputime: Some(60),
            memory: Some(1024),
            ..Default::default()
        };

        let limits = args.to_limits().unwrap();

        assert_eq!(limits.cputime(), Some(60));
        assert_eq!(limits.cputime_hard(), Some(60));
        assert_eq!(limits.memory(), Some(1024));
        assert_eq!(limits.walltime(), None);
    }

    #[test]
    fn test_limits_hard_below_soft() {
        let args = LimitArgs {
            cputime: Some(60),
            cputime_hard: Some(30),
            ..Default::default()
        };

        assert!(args.to_limits().is_err());
    }

    #[test]
    fn test_limits_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cputime": 10, "cputime_hard": 20, "cpu_cores": 2}}"#).unwrap();

        let args = LimitArgs {
            limits_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let limits = args.to_limits().unwrap();

        assert_eq!(limits.cputime_hard(), Some(20));
        assert_eq!(limits.cpu_cores(), Some(2));
    }

    #[test]
    fn test_no_limits() {
        assert!(LimitArgs::default().to_limits().unwrap().is_unlimited());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variables_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("HOME"), OsString::from("/root")),
            (OsString::from("BROKEN"), OsString::from_vec(vec![0xff])),
            (OsString::from_vec(vec![b'X', 0xfe]), OsString::from("1")),
        ];

        assert_eq!(
            utf8_environment(vars),
            vec![("HOME".to_string(), "/root".to_string())]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_with_non_utf8_environment() {
        use std::os::unix::ffi::OsStringExt;
        use std::sync::Arc;
        use toolinfo_core::application::RunPlanner;
        use toolinfo_core::port::tool_locator::mocks::MockToolLocator;
        use toolinfo_tools::WaspC;

        let vars = vec![
            (OsString::from("PATH"), OsString::from("/usr/bin")),
            (OsString::from("BROKEN"), OsString::from_vec(vec![0xff])),
        ];
        let task = TaskArgs {
            input_files: vec!["prog.c".to_string()],
            property_file: Some("p.prp".to_string()),
            ..Default::default()
        }
        .to_task()
        .unwrap();
        let planner = RunPlanner::new(Arc::new(
            MockToolLocator::new().with("wasp-c", "/opt/wasp/bin/wasp-c"),
        ));

        let invocation = planner
            .plan(
                &WaspC,
                &[],
                &task,
                &LimitArgs::default().to_limits().unwrap(),
                utf8_environment(vars),
            )
            .unwrap();

        assert_eq!(
            invocation.cmdline,
            vec!["/opt/wasp/bin/wasp-c", "--property", "p.prp", "prog.c"]
        );
        assert_eq!(invocation.environment["PATH"], "/usr/bin");
        assert!(!invocation.environment.contains_key("BROKEN"));
    }
}
