// Bundled tool adapters
// Each module implements ToolInfo for one external program

pub mod wasp_c;

pub use wasp_c::WaspC;

use toolinfo_core::application::ToolRegistry;
use toolinfo_core::Result;

/// Registry key of the WASP-C adapter
pub const WASP_C: &str = "wasp-c";

/// Registry with every bundled adapter
pub fn default_registry() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(WASP_C, WaspC)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = default_registry().unwrap();

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec![WASP_C]);
        assert_eq!(registry.get(WASP_C).unwrap().name(), "WASP-C");
    }
}
