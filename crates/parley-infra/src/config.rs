//! Server configuration loader for Parley.
//!
//! Reads `config.toml` from the data directory (`~/.parley/` in production)
//! and deserializes it into [`ServerConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use parley_types::config::ServerConfig;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "PARLEY_DATA_DIR";
/// Overrides `[inference] url`.
pub const INFERENCE_URL_ENV: &str = "PARLEY_INFERENCE_URL";
/// Overrides `[inference] api_key`.
pub const INFERENCE_API_KEY_ENV: &str = "PARLEY_INFERENCE_API_KEY";

/// Accepted range for `[session] ttl_hours` (one hour to ten years).
pub const SESSION_TTL_HOURS_RANGE: std::ops::RangeInclusive<i64> = 1..=87_600;

/// Resolve the data directory: `$PARLEY_DATA_DIR`, else `~/.parley`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".parley"))
        .unwrap_or_else(|| PathBuf::from(".parley"))
}

/// SQLite URL for the database inside `data_dir`.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("parley.db").display())
}

/// Load server configuration from `{data_dir}/config.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: logs a warning and uses defaults.
/// - Environment overrides are applied last in every case.
/// - Out-of-range values are clamped with a warning.
pub async fn load_server_config(data_dir: &Path) -> ServerConfig {
    let mut config = read_config_file(data_dir).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    clamp_limits(&mut config);
    config
}

fn clamp_limits(config: &mut ServerConfig) {
    let ttl = config.session.ttl_hours;
    let clamped = ttl.clamp(*SESSION_TTL_HOURS_RANGE.start(), *SESSION_TTL_HOURS_RANGE.end());
    if clamped != ttl {
        tracing::warn!(
            ttl_hours = ttl,
            using = clamped,
            "session.ttl_hours out of range, clamping"
        );
        config.session.ttl_hours = clamped;
    }

    if config.inference.timeout_secs == 0 {
        tracing::warn!("inference.timeout_secs must be positive, using 1");
        config.inference.timeout_secs = 1;
    }
}

async fn read_config_file(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// Apply env overrides through `lookup` so tests need not mutate the
/// process environment. Empty values are ignored.
fn apply_env_overrides(config: &mut ServerConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(INFERENCE_URL_ENV).filter(|v| !v.is_empty()) {
        config.inference.url = url;
    }
    if let Some(key) = lookup(INFERENCE_API_KEY_ENV).filter(|v| !v.is_empty()) {
        config.inference.api_key = Some(key);
    }
}
