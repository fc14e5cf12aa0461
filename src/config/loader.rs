//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "SERIAL_LOOPBACK";

/// Config file name inside the per-user config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config file name looked up in the working directory
const LOCAL_CONFIG_FILE_NAME: &str = "serial-loopback.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "SERIAL_LOOPBACK_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `SERIAL_LOOPBACK_CONFIG` environment variable (explicit path)
    /// 2. `./serial-loopback.toml` (current directory)
    /// 3. the per-user config dir, e.g. `~/.config/serial-loopback/config.toml`
    /// 4. Built-in defaults (no file required)
    ///
    /// Environment variables override file values.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = match config_path {
            Some(ref path) => load_from_file(path)?,
            None => Config::default(),
        };

        apply_env_overrides(&mut config)?;
        validate(&config)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;
        validate(&config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Overrides that fail to parse or validate are dropped here.
        let mut overridden = config.clone();
        if apply_env_overrides(&mut overridden).is_ok() && validate(&overridden).is_ok() {
            config = overridden;
        }

        Self {
            config_path: None,
            config,
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let cwd_config = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    get_default_config_path().filter(|path| path.exists())
}

/// Get the default config file path, whether or not it exists.
pub fn get_default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "serial-loopback").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load configuration from a file.
fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Apply environment variable overrides to the configuration.
///
/// - `SERIAL_LOOPBACK_LOG_LEVEL=debug`
/// - `SERIAL_LOOPBACK_LOG_FORMAT=json`
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var(format!("{}_LOG_FORMAT", ENV_PREFIX)) {
        config.logging.format = val
            .parse()
            .map_err(|message: String| ConfigError::env_parse(format!("{}_LOG_FORMAT", ENV_PREFIX), message))?;
    }

    Ok(())
}

fn validate(config: &Config) -> ConfigResult<()> {
    EnvFilter::try_new(&config.logging.level)
        .map_err(|e| ConfigError::validation("logging.level", e.to_string()))?;

    if let Some((alias, _)) = config.serial.port_aliases.iter().find(|(_, target)| target.is_empty()) {
        return Err(ConfigError::validation(
            format!("serial.port_aliases.{alias}"),
            "alias must point at a device",
        ));
    }

    Ok(())
}
