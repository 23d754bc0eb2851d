// Tool registry
// Selects adapters of either contract generation by key

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::application::legacy_adapter::LegacyToolAdapter;
use crate::error::{AppError, Result};
use crate::port::{LegacyToolInfo, ToolInfo};

/// Keyed set of tool adapters.
///
/// Legacy adapters are wrapped on registration, so callers always get an
/// `Arc<dyn ToolInfo>` back and can share it across concurrent runs.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn ToolInfo>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a current-generation adapter under `key`
    ///
    /// # Errors
    /// - AppError::Config if the key or the tool name is empty
    /// - AppError::Conflict if the key is already taken
    pub fn register<T: ToolInfo + 'static>(&mut self, key: impl Into<String>, tool: T) -> Result<()> {
        self.register_arc(key, Arc::new(tool))
    }

    /// Register a legacy adapter under `key`
    pub fn register_legacy<T: LegacyToolInfo + 'static>(
        &mut self,
        key: impl Into<String>,
        tool: T,
    ) -> Result<()> {
        self.register_arc(key, Arc::new(LegacyToolAdapter::new(tool)))
    }

    pub fn register_arc(&mut self, key: impl Into<String>, tool: Arc<dyn ToolInfo>) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(AppError::Config("tool key cannot be empty".to_string()));
        }
        if tool.name().trim().is_empty() {
            return Err(AppError::Config(format!(
                "tool registered as '{}' has an empty name",
                key
            )));
        }
        if self.tools.contains_key(&key) {
            return Err(AppError::Conflict(format!("tool '{}' already registered", key)));
        }

        debug!(key = %key, name = %tool.name(), "Registered tool");
        self.tools.insert(key, tool);
        Ok(())
    }

    /// Adapter registered under `key`
    ///
    /// # Errors
    /// AppError::NotFound for unknown keys
    pub fn get(&self, key: &str) -> Result<Arc<dyn ToolInfo>> {
        self.tools
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("no tool registered as '{}'", key)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn ToolInfo>)> {
        self.tools.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
