//! Port abstraction layer for serial communication.
//!
//! Provides the transport trait plus a hardware implementation and a mock,
//! so the session can be driven in tests without a device.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockSerialPort;
pub use sync_port::SyncSerialPort;
pub use traits::*;
