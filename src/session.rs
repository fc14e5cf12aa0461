//! Port session: one open transport and the two line primitives.
//!
//! A session is created once by the entry point and lives until the process
//! exits. Outbound lines get a single `\n` appended; inbound lines are read a
//! byte at a time up to and including the first `\n`.
//!
//! # Blocking contract
//!
//! [`Session::receive_line`] has no timeout, no length bound and no
//! cancellation. If the peer never sends a newline the call never returns.
//! Callers that need a deadline must impose it themselves, for example by
//! running the exchange on a worker thread.

use crate::port::{PortConfiguration, PortError, SerialPortAdapter, SyncSerialPort};
use std::time::Duration;
use tracing::{debug, info, trace};

/// Byte that ends every line on the wire.
pub const TERMINATOR: u8 = b'\n';

/// Pause after a read that returned no bytes and no error.
const EOF_BACKOFF: Duration = Duration::from_millis(10);

/// A single serial connection used for the whole process lifetime.
pub struct Session<P: SerialPortAdapter = SyncSerialPort> {
    port: P,
}

impl Session<SyncSerialPort> {
    /// Open `port_name` at 115200 8N1.
    ///
    /// Fails if the device is absent, not accessible, or already in use.
    pub fn open(port_name: &str) -> Result<Self, PortError> {
        let config = PortConfiguration::default();
        let port = SyncSerialPort::open(port_name, &config)?;
        info!(port = port_name, baud = config.baud_rate, "serial port opened");
        Ok(Self::with_port(port))
    }
}

impl<P: SerialPortAdapter> Session<P> {
    /// Wrap an already opened transport.
    pub fn with_port(port: P) -> Self {
        Self { port }
    }

    /// Port identifier this session talks to.
    pub fn name(&self) -> &str {
        self.port.name()
    }

    /// Discard pending input, then transmit `line` followed by `\n`.
    ///
    /// Nothing is awaited from the peer. An embedded newline in `line` is
    /// sent as-is.
    pub fn send(&mut self, line: &str) -> Result<(), PortError> {
        if let Some(stale) = self.port.bytes_to_read().filter(|&n| n > 0) {
            debug!(port = self.port.name(), stale, "discarding unread input");
        }
        self.port.clear_input()?;

        let mut frame = Vec::with_capacity(line.len() + 1);
        frame.extend_from_slice(line.as_bytes());
        frame.push(TERMINATOR);

        let mut sent = 0;
        while sent < frame.len() {
            let n = self.port.write_bytes(&frame[sent..])?;
            if n == 0 {
                return Err(PortError::Io(std::io::ErrorKind::WriteZero.into()));
            }
            sent += n;
        }

        debug!(port = self.port.name(), bytes = sent, "line sent");
        Ok(())
    }

    /// Block until a full line has been received and return it, `\n` included.
    ///
    /// Reads one byte per transport call so nothing after the terminator is
    /// consumed. Idle polls are retried indefinitely; only a hard transport
    /// error ends the wait early. Non-UTF-8 bytes are replaced with U+FFFD.
    pub fn receive_line(&mut self) -> Result<String, PortError> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            match self.port.read_bytes(&mut byte) {
                Ok(0) => {
                    trace!(port = self.port.name(), received = line.len(), "empty read");
                    std::thread::sleep(EOF_BACKOFF);
                }
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == TERMINATOR {
                        break;
                    }
                }
                Err(e) if e.is_idle() => {
                    trace!(port = self.port.name(), received = line.len(), "waiting for terminator");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(port = self.port.name(), bytes = line.len(), "line received");
        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}

impl<P: SerialPortAdapter> std::fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("port", &self.port).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MockSerialPort;

    #[test]
    fn test_send_appends_single_newline() {
        let port = MockSerialPort::new("MOCK0");
        let mut session = Session::with_port(port.clone());

        session.send("hello").unwrap();
        assert_eq!(port.written_bytes(), b"hello\n");
    }

    #[test]
    fn test_send_empty_line_is_just_terminator() {
        let port = MockSerialPort::new("MOCK0");
        let mut session = Session::with_port(port.clone());

        session.send("").unwrap();
        assert_eq!(port.written_bytes(), b"\n");
    }

    #[test]
    fn test_send_finishes_partial_writes() {
        let port = MockSerialPort::new("MOCK0");
        port.set_write_chunk(Some(3));
        let mut session = Session::with_port(port.clone());

        session.send("abcdefg").unwrap();
        assert_eq!(port.get_write_log().len(), 3);
        assert_eq!(port.written_bytes(), b"abcdefg\n");
    }

    #[test]
    fn test_send_clears_input_first() {
        let port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"old reply\n");
        let mut session = Session::with_port(port.clone());

        session.send("x").unwrap();
        assert_eq!(port.clear_count(), 1);
        assert_eq!(port.available_bytes(), 0);
    }

    #[test]
    fn test_receive_survives_idle_polls() {
        let port = MockSerialPort::new("MOCK0");
        port.queue_timeouts(3);
        port.enqueue_read(b"late\n");
        let mut session = Session::with_port(port);

        assert_eq!(session.receive_line().unwrap(), "late\n");
    }

    #[test]
    fn test_receive_backs_off_on_empty_reads() {
        let port = MockSerialPort::new("MOCK0");
        port.queue_empty_reads(5);
        port.enqueue_read(b"ok\n");
        let mut session = Session::with_port(port.clone());

        let started = std::time::Instant::now();
        assert_eq!(session.receive_line().unwrap(), "ok\n");
        assert!(started.elapsed() >= EOF_BACKOFF * 5);
        assert_eq!(port.reads_served(), 3);
    }

    #[test]
    fn test_receive_propagates_hard_errors() {
        let port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"partial");
        let mut session = Session::with_port(port.clone());
        port.set_disconnected(true);

        assert!(matches!(session.receive_line(), Err(PortError::Io(_))));
    }

    #[test]
    fn test_receive_lossy_decodes() {
        let port = MockSerialPort::new("MOCK0");
        port.enqueue_read(&[0x66, 0xff, 0x6f, b'\n']);
        let mut session = Session::with_port(port);

        assert_eq!(session.receive_line().unwrap(), "f\u{fffd}o\n");
    }

    #[test]
    fn test_name_comes_from_port() {
        let session = Session::with_port(MockSerialPort::new("COM7"));
        assert_eq!(session.name(), "COM7");
        assert!(format!("{:?}", session).contains("COM7"));
    }
}
