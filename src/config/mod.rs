//! Configuration module.
//!
//! Optional TOML configuration with environment variable overrides. It only
//! covers ambient concerns (logging, port aliases); the line settings are
//! fixed.
//!
//! # Configuration Resolution
//!
//! 1. `SERIAL_LOOPBACK_CONFIG` environment variable (explicit path)
//! 2. `./serial-loopback.toml` (current directory)
//! 3. Per-user config directory (`~/.config/serial-loopback/config.toml`,
//!    `%APPDATA%\serial-loopback\config\config.toml`, ...)
//! 4. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! - `SERIAL_LOOPBACK_LOG_LEVEL=debug`
//! - `SERIAL_LOOPBACK_LOG_FORMAT=json`
//!
//! # Example
//!
//! ```toml
//! [logging]
//! level = "serial_loopback=debug"
//! format = "compact"
//!
//! [serial.port_aliases]
//! board = "/dev/serial/by-id/usb-STMicroelectronics_STM32_Virtual_ComPort-if00"
//! ```

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{get_default_config_path, resolve_config_path, ConfigLoader};
pub use schema::{Config, LogFormat, LoggingConfig, SerialConfig};
