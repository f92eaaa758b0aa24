mod config;
pub mod database;
pub mod plan_store;

pub use config::{Config, FocusConfig, PriorityConfigSection, TimelineConfig, UiConfig};
pub use database::{Database, FocusSessionRecord, FocusStats};
pub use plan_store::{decode_or_else, PlanStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/smartstudy[-dev]/` based on SMARTSTUDY_ENV.
///
/// Set SMARTSTUDY_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SMARTSTUDY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("smartstudy-dev")
    } else {
        base_dir.join("smartstudy")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
