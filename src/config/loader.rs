// Configuration loader
// Reads ~/.review-sentiment/config.toml, then fills the token from the environment

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{CONFIG_DIR_NAME, TOKEN_ENV_VAR};
use super::settings::Config;

/// Default location of the config file, if a home directory exists
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Load configuration from the default path, falling back to defaults.
///
/// Values are validated by the subcommand that uses them.
pub fn load_config() -> Result<Config> {
    let config = match config_path() {
        Some(path) if path.exists() => load_from_path(&path)?,
        _ => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    Ok(finish(config, std::env::var(TOKEN_ENV_VAR).ok()))
}

/// Load configuration from an explicit file
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config.receiver.log_dir = expand_home(&config.receiver.log_dir);
    tracing::debug!("Loaded config from {}", path.display());

    Ok(config)
}

fn finish(mut config: Config, env_token: Option<String>) -> Config {
    if config.api_token().is_none() {
        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            tracing::debug!("Using inference token from {}", TOKEN_ENV_VAR);
            config.classifier.api_token = Some(token);
        }
    }

    config
}

/// Replace a leading `~` with the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
