//! Port-specific error types.
//!
//! Kept separate from the binary-level [`AppError`](crate::error::AppError) so
//! the session layer can be reused without the CLI.

use thiserror::Error;

/// Errors that can occur during serial port operations.
#[derive(Debug, Error)]
pub enum PortError {
    /// The specified serial port was not found on the system.
    #[error("Serial port not found: {0}")]
    NotFound(String),

    /// The device exists but the current user may not open it.
    #[error("Permission denied opening serial port: {0}")]
    PermissionDenied(String),

    /// The device is held open by another process.
    #[error("Serial port is busy: {0}")]
    Busy(String),

    /// Port configuration failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A read poll elapsed without data.
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// An I/O error occurred during port operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialport-specific error occurred.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl PortError {
    /// Create a NotFound error from a port name.
    pub fn not_found(port_name: impl Into<String>) -> Self {
        Self::NotFound(port_name.into())
    }

    /// Create a Config error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a Timeout error from a duration.
    pub fn timeout(duration: std::time::Duration) -> Self {
        Self::Timeout(duration)
    }

    /// Classify an open failure reported by the `serialport` crate.
    pub fn from_open(port_name: &str, err: serialport::Error) -> Self {
        match err.kind() {
            serialport::ErrorKind::NoDevice => Self::not_found(port_name),
            serialport::ErrorKind::InvalidInput => Self::config(err.to_string()),
            serialport::ErrorKind::Io(std::io::ErrorKind::NotFound) => Self::not_found(port_name),
            serialport::ErrorKind::Io(std::io::ErrorKind::PermissionDenied) => {
                Self::PermissionDenied(port_name.to_string())
            }
            _ if err.description.to_lowercase().contains("busy") => {
                Self::Busy(port_name.to_string())
            }
            _ => Self::Serial(err),
        }
    }

    /// True when the error only means "no byte arrived during this poll".
    ///
    /// The session keeps reading on these; everything else is fatal.
    pub fn is_idle(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }
}
