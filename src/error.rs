use crate::config::ConfigError;
use crate::port::PortError;
use thiserror::Error;

/// A specialized `Result` type for the binary and the interactive loop.
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error type.
///
/// Every variant ends the process; nothing is recovered mid-session.
#[derive(Debug, Error)]
pub enum AppError {
    /// The serial transport failed to open or broke during an exchange.
    #[error(transparent)]
    Port(#[from] PortError),

    /// The configuration file or environment overrides were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading the operator's input or writing to the terminal failed.
    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_is_transparent() {
        let err: AppError = PortError::not_found("COM9").into();
        assert_eq!(err.to_string(), "Serial port not found: COM9");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: AppError = ConfigError::validation("logging.level", "bad directive").into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'logging.level': bad directive"
        );
    }

    #[test]
    fn test_terminal_error_display() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed").into();
        assert_eq!(err.to_string(), "Terminal I/O failed: stdout closed");
    }
}
