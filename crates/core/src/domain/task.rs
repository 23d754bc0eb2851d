// Task Domain Model
// One unit of analysis work: input files XOR a bare identifier

use serde::Serialize;

use crate::domain::error::{DomainError, Result};

/// The task a tool is executed on in one run.
///
/// A task is defined either by a non-empty list of input files or by an
/// identifier (for tasks without files), never both and never neither.
/// All paths are absolute or relative to the tool's working directory.
///
/// Fields are private: a `Task` is immutable once built and adapters only
/// ever see it through `&Task`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    input_files: Vec<String>,
    identifier: Option<String>,
    property_file: Option<String>,
    options: Option<serde_json::Value>,
}

impl Task {
    /// Create a task from both shapes, enforcing that exactly one is given.
    ///
    /// # Errors
    /// `DomainError::InvalidTask` if both or neither of `input_files` and
    /// `identifier` are given, or if the identifier is empty.
    pub fn new<I, S>(input_files: I, identifier: Option<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let input_files: Vec<String> = input_files.into_iter().map(Into::into).collect();

        if let Some(id) = &identifier {
            if id.is_empty() {
                return Err(DomainError::InvalidTask(
                    "identifier cannot be empty".to_string(),
                ));
            }
        }

        match (input_files.is_empty(), identifier.is_some()) {
            (false, true) => Err(DomainError::InvalidTask(format!(
                "exactly one of input files and identifier is required, got both: \
                 input_files={:?} identifier={:?}",
                input_files, identifier
            ))),
            (true, false) => Err(DomainError::InvalidTask(
                "exactly one of input files and identifier is required, got neither".to_string(),
            )),
            _ => Ok(Self {
                input_files,
                identifier,
                property_file: None,
                options: None,
            }),
        }
    }

    /// Task defined by a non-empty list of input files
    pub fn with_files<I, S>(input_files: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(input_files, None)
    }

    /// Task defined by an identifier only (no input files)
    pub fn without_files(identifier: impl Into<String>) -> Result<Self> {
        Self::new(Vec::<String>::new(), Some(identifier.into()))
    }

    /// Attach the property file (what the tool has to verify)
    pub fn with_property_file(mut self, property_file: impl Into<String>) -> Self {
        self.property_file = Some(property_file.into());
        self
    }

    /// Attach task options.
    ///
    /// The value is deep-copied, later changes to the caller's value are not
    /// visible through this task.
    pub fn with_options(mut self, options: &serde_json::Value) -> Self {
        self.options = Some(options.clone());
        self
    }

    /// Input files, failing for tasks defined without files
    pub fn input_files(&self) -> Result<&[String]> {
        self.require_input_files()?;
        Ok(&self.input_files)
    }

    /// Input files as given, empty for tasks defined by an identifier.
    ///
    /// Prefer `input_files()` or `input_files_or_identifier()`.
    pub fn input_files_or_empty(&self) -> &[String] {
        &self.input_files
    }

    /// Either the input files or a one-element list with the identifier.
    ///
    /// Useful for appending *something* positional to a command line.
    pub fn input_files_or_identifier(&self) -> Vec<&str> {
        match &self.identifier {
            Some(id) if self.input_files.is_empty() => vec![id.as_str()],
            _ => self.input_files.iter().map(String::as_str).collect(),
        }
    }

    /// The only input file of this task
    ///
    /// # Errors
    /// `DomainError::UnsupportedFeature` if the task has no input files or
    /// more than one.
    pub fn single_input_file(&self) -> Result<&str> {
        self.require_input_files()?;
        match self.input_files.as_slice() {
            [single] => Ok(single.as_str()),
            _ => Err(DomainError::UnsupportedFeature(
                "Tool does not support tasks with more than one input file".to_string(),
            )),
        }
    }

    /// Check that the task has at least one input file
    pub fn require_input_files(&self) -> Result<()> {
        if self.input_files.is_empty() {
            return Err(DomainError::UnsupportedFeature(
                "Tool does not support tasks without input files".to_string(),
            ));
        }
        Ok(())
    }

    /// Name of the task when defined without input files
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn property_file(&self) -> Option<&str> {
        self.property_file.as_deref()
    }

    /// Content of the "options" key of the task definition, if any
    pub fn options(&self) -> Option<&serde_json::Value> {
        self.options.as_ref()
    }
}
