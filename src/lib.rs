//! Serial Loopback Library
//!
//! Manual test harness for a serial loopback peer: send an operator-typed
//! line with `\n` appended, then block until the peer's newline-terminated
//! reply arrives and print it.
//!
//! # Modules
//!
//! - `port`: transport trait, hardware port and mock port
//! - `session`: the open port plus `send` / `receive_line`
//! - `repl`: the interactive prompt loop
//! - `cli`: argument parsing and exit statuses
//! - `interrupt`: Ctrl+C watcher
//! - `config`: optional TOML configuration with environment overrides
//! - `logging`: `tracing` subscriber setup
//! - `error`: unified error handling

pub mod cli;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod logging;
pub mod port;
pub mod repl;
pub mod session;

// Re-export commonly used types for convenience
pub use cli::{parse_args, CliOutcome};
pub use error::{AppError, AppResult};
pub use port::{MockSerialPort, PortConfiguration, PortError, SerialPortAdapter, SyncSerialPort, BAUD_RATE};
pub use repl::LoopOutcome;
pub use session::Session;

// Re-export config types
pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};
