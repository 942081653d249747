mod config;

pub use config::{
    BreathingConfig, Config, ListingConfig, LogConfig, PromptsConfig, ReflectionConfig,
    SessionConfig,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `MINDFULNESS_HOME` wins when set. Otherwise `~/.config/mindfulness[-dev]/`
/// based on `MINDFULNESS_ENV` (set it to `dev` for the development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("MINDFULNESS_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("MINDFULNESS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("mindfulness-dev")
            } else {
                base_dir.join("mindfulness")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
