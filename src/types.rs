//! Life Server - Type Definitions
//!
//! Shared configuration types for the life server.

use serde::{Deserialize, Serialize};

// ─── Configuration ───────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Deployment environment label, purely informational.
    pub env: String,
    /// Log file path; empty means log to stderr.
    pub logs_path: String,
    /// Append-only density log path.
    pub states_path: String,
    pub log_level: LogLevel,
    pub http_server: HttpServerConfig,
    pub life: LifeConfig,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpServerConfig {
    /// Bind address, e.g. `0.0.0.0:8081`.
    pub address: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifeConfig {
    /// Grid height in rows.
    pub height: i64,
    /// Grid width in columns.
    pub width: i64,
    /// Initial seed density percentage.
    pub fill: i64,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The level as a `tracing` filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Returns the default `AppConfig`. Fields that have no sensible default
/// are left empty so callers can override them.
pub fn default_config() -> AppConfig {
    AppConfig {
        env: "production".to_string(),
        logs_path: String::new(),
        states_path: "~/.life/states.log".to_string(),
        log_level: LogLevel::Info,
        http_server: HttpServerConfig {
            address: "0.0.0.0:8081".to_string(),
            timeout_secs: 10,
        },
        life: LifeConfig {
            height: 20,
            width: 30,
            fill: 40,
        },
    }
}
