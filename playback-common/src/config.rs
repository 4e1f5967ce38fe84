//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Name of the session cookie issued at login/signup
pub const SESSION_COOKIE: &str = "playback_session";

/// Server-side session lifetime in seconds (30 days)
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Credentials for the external music-catalog API
#[derive(Debug, Clone)]
pub struct CatalogCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (PLAYBACK_DATA)
/// 3. TOML config file (data_folder key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("PLAYBACK_DATA") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config) = load_config_table() {
        if let Some(data_folder) = config.get("data_folder").and_then(|v| v.as_str()) {
            return PathBuf::from(data_folder);
        }
    }

    // Priority 4: OS-dependent compiled default
    default_data_folder()
}

/// Resolve catalog API credentials
///
/// Environment variables (PLAYBACK_CLIENT_ID / PLAYBACK_CLIENT_SECRET) take
/// priority over the TOML config file (client_id / client_secret keys).
/// Missing credentials are a configuration error, not a panic: the service
/// cannot reach the catalog without them.
pub fn resolve_catalog_credentials(
    cli_id: Option<&str>,
    cli_secret: Option<&str>,
) -> Result<CatalogCredentials> {
    let config = load_config_table().ok();

    let from_config = |key: &str| -> Option<String> {
        config
            .as_ref()
            .and_then(|c| c.get(key))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };

    let client_id = cli_id
        .map(str::to_string)
        .or_else(|| std::env::var("PLAYBACK_CLIENT_ID").ok())
        .or_else(|| from_config("client_id"))
        .ok_or_else(|| Error::Config("Catalog client_id not configured".to_string()))?;

    let client_secret = cli_secret
        .map(str::to_string)
        .or_else(|| std::env::var("PLAYBACK_CLIENT_SECRET").ok())
        .or_else(|| from_config("client_secret"))
        .ok_or_else(|| Error::Config("Catalog client_secret not configured".to_string()))?;

    Ok(CatalogCredentials {
        client_id,
        client_secret,
    })
}

/// Database path inside the data folder
pub fn database_path(data_folder: &std::path::Path) -> PathBuf {
    data_folder.join("playback.db")
}

/// Parse the platform config file, if one exists
fn load_config_table() -> Result<toml::Table> {
    let path = find_config_file()?;
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Get configuration file path for the platform
fn find_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/playback/config.toml first, then /etc/playback/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("playback").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/playback/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("playback").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("playback"))
        .unwrap_or_else(|| PathBuf::from("./playback_data"))
}
