/*!
 * Modeler - desktop modeler backend
 *
 * Everything the modeler shell needs outside the diagram editors:
 * - Zeebe gateway connectivity, deployment and instance creation
 *   (via the `zeebe-connect` crate)
 * - File dialog filters
 * - Execution platform registry
 * - Edit and window menu entries
 * - Configuration and logging setup
 */

pub mod commands;
pub mod config;
pub mod engines;
pub mod error;
pub mod filters;
pub mod logging;
pub mod menu;

// Re-export commonly used types
pub use config::{LogLevel, ModelerConfig, DISABLE_ADJUST_ORIGIN};
pub use engines::{get_latest_stable, Engine, EngineProfile};
pub use error::{ModelerError, Result};
pub use filters::{get_filters, FileFilter};
pub use menu::MenuEntry;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
