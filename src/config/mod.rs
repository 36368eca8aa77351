mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

pub const CONFIG_PATH_VAR: &str = "PARLEY_CONFIG_PATH";
pub const API_URL_VAR: &str = "PARLEY_API_URL";
pub const PREFERENCES_PATH_VAR: &str = "PARLEY_PREFERENCES_PATH";

/// Loads the config file named by `PARLEY_CONFIG_PATH` (default `parley.yaml`)
/// and applies environment overrides on top.
pub async fn load() -> Result<Config> {
    let config_path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "parley.yaml".to_string());
    let mut config = load_from(&config_path).await?;
    apply_overrides(
        &mut config,
        env::var(API_URL_VAR).ok(),
        env::var(PREFERENCES_PATH_VAR).ok(),
    );
    Ok(config)
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => Ok(serde_yaml::from_str(&config_str)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Environment values win over the file. Empty values count as unset.
pub fn apply_overrides(
    config: &mut Config,
    api_url: Option<String>,
    preferences_path: Option<String>,
) {
    if let Some(url) = api_url.filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url;
    }
    if let Some(path) = preferences_path.filter(|v| !v.trim().is_empty()) {
        config.preferences.path = path;
    }
    if config.api.base_url.trim().is_empty() {
        config.api.base_url = DEFAULT_API_URL.to_string();
    }
}
