//! Core traits for serial port abstraction.
//!
//! Defines the `SerialPortAdapter` trait that allows both real serial ports
//! and mock implementations to sit underneath a [`Session`](crate::session::Session).

use super::error::PortError;
use std::time::Duration;

/// Fixed line speed of the loopback harness.
pub const BAUD_RATE: u32 = 115_200;

/// How long a single OS-level read waits before reporting "nothing yet".
///
/// This is not a receive timeout: the session retries on every expiry.
pub const READ_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Line settings used when opening a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortConfiguration {
    /// Baud rate (bits per second).
    pub baud_rate: u32,

    /// Number of data bits.
    pub data_bits: serialport::DataBits,

    /// Flow control mode.
    pub flow_control: serialport::FlowControl,

    /// Parity checking mode.
    pub parity: serialport::Parity,

    /// Number of stop bits.
    pub stop_bits: serialport::StopBits,

    /// Per-read poll interval handed to the driver.
    pub poll_interval: Duration,
}

impl Default for PortConfiguration {
    /// 115200 8N1, no flow control.
    fn default() -> Self {
        Self {
            baud_rate: BAUD_RATE,
            data_bits: serialport::DataBits::Eight,
            flow_control: serialport::FlowControl::None,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            poll_interval: READ_POLL_INTERVAL,
        }
    }
}

/// Trait for serial port I/O operations.
///
/// This trait abstracts over synchronous serial port operations, allowing both
/// real hardware ports and mock implementations for testing.
pub trait SerialPortAdapter: Send + std::fmt::Debug {
    /// Write bytes to the serial port.
    ///
    /// Returns the number of bytes actually written.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError>;

    /// Read bytes from the serial port into the provided buffer.
    ///
    /// Returns the number of bytes actually read. An idle poll surfaces as an
    /// error for which [`PortError::is_idle`] is true.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError>;

    /// Get the name/path of this serial port.
    fn name(&self) -> &str;

    /// Discard any unread data in the receive buffer.
    ///
    /// The transmit buffer is left untouched.
    fn clear_input(&mut self) -> Result<(), PortError>;

    /// Get the current bytes available to read (if supported).
    ///
    /// Returns `None` if the operation is not supported or cannot be determined.
    fn bytes_to_read(&self) -> Option<usize> {
        None
    }
}
