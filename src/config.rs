//! Server Configuration
//!
//! Loads the life server configuration from a JSON file, merging unset
//! fields with defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::{default_config, AppConfig};

/// Load the server config from a JSON file at `path`.
///
/// Missing or empty fields are merged with the defaults from
/// [`default_config`]. Grid dimensions are merged only when unset (zero);
/// explicitly negative values are left alone so session construction can
/// reject them.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;

    let mut config: AppConfig = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config from {}", path.display()))?;

    let defaults = default_config();

    if config.env.is_empty() {
        config.env = defaults.env;
    }
    if config.states_path.is_empty() {
        config.states_path = defaults.states_path;
    }
    if config.http_server.address.is_empty() {
        config.http_server.address = defaults.http_server.address;
    }
    if config.http_server.timeout_secs == 0 {
        config.http_server.timeout_secs = defaults.http_server.timeout_secs;
    }
    if config.life.height == 0 {
        config.life.height = defaults.life.height;
    }
    if config.life.width == 0 {
        config.life.width = defaults.life.width;
    }
    if config.life.fill == 0 {
        config.life.fill = defaults.life.fill;
    }

    Ok(config)
}

/// Resolve a path that may start with `~` to an absolute path.
///
/// If the path starts with `~`, the tilde is replaced with the user's home
/// directory. Otherwise the path is returned as-is.
pub fn resolve_path(p: &str) -> String {
    if let Some(rest) = p.strip_prefix('~') {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"));
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest).to_string_lossy().to_string()
    } else {
        p.to_string()
    }
}
