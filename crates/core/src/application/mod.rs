// Application Layer - Harness-side services built on the adapter contract

pub mod constants;
pub mod legacy_adapter;
pub mod reconcile;
pub mod registry;
pub mod run_plan;
pub mod version;

// Re-exports
pub use legacy_adapter::LegacyToolAdapter;
pub use crate::domain::program_files::{expand_filename_pattern, program_files_from_executable};
pub use reconcile::reconcile_outcome;
pub use registry::ToolRegistry;
pub use run_plan::{RunClassification, RunInvocation, RunPlanner};
pub use version::{extract_version, VersionProbe, VersionQuery};
