//! Mock serial port implementation for testing.
//!
//! Provides a `MockSerialPort` that simulates a serial link without hardware.
//! It can behave as a loopback peer, replaying every write into its own
//! receive queue.

use super::error::PortError;
use super::traits::{SerialPortAdapter, READ_POLL_INTERVAL};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Pause taken by an empty read before reporting `WouldBlock`.
const IDLE_BACKOFF: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct MockPortState {
    /// Bytes to be returned by read operations.
    read_queue: VecDeque<u8>,
    /// Every buffer handed to `write_bytes`, in order.
    write_log: Vec<Vec<u8>>,
    /// Copy writes back into `read_queue`.
    echo: bool,
    /// Cap on bytes accepted per write, to exercise partial writes.
    write_chunk: Option<usize>,
    /// Number of upcoming reads that report a poll timeout.
    pending_timeouts: usize,
    /// Number of upcoming reads that return `Ok(0)`.
    pending_empty_reads: usize,
    /// Reads and writes fail as if the device was unplugged.
    disconnected: bool,
    /// Number of `clear_input` calls.
    clear_count: usize,
    /// Number of `read_bytes` calls that returned data.
    reads_served: usize,
}

/// Mock serial port implementation for testing.
///
/// Clones share state, so a test can keep one handle while a
/// [`Session`](crate::session::Session) owns another.
///
/// # Example
/// ```
/// use serial_loopback::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_read(b"Hello");
///
/// let mut buffer = [0u8; 5];
/// let n = port.read_bytes(&mut buffer).unwrap();
/// assert_eq!(&buffer[..n], b"Hello");
///
/// port.write_bytes(b"Response").unwrap();
/// assert_eq!(port.get_write_log(), vec![b"Response".to_vec()]);
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    name: String,
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    /// Create a new mock serial port with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState::default())),
        }
    }

    /// Create a mock that echoes every write back, like a wired loopback.
    pub fn loopback(name: impl Into<String>) -> Self {
        let port = Self::new(name);
        port.lock().echo = true;
        port
    }

    fn lock(&self) -> MutexGuard<'_, MockPortState> {
        // A panicking test thread must not hide the state from the others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Enqueue bytes to be returned by subsequent read operations.
    pub fn enqueue_read(&self, data: &[u8]) {
        self.lock().read_queue.extend(data);
    }

    /// Accept at most `chunk` bytes per write call.
    pub fn set_write_chunk(&self, chunk: Option<usize>) {
        self.lock().write_chunk = chunk;
    }

    /// Make the next `count` reads report a poll timeout.
    pub fn queue_timeouts(&self, count: usize) {
        self.lock().pending_timeouts += count;
    }

    /// Make the next `count` reads return zero bytes without an error.
    pub fn queue_empty_reads(&self, count: usize) {
        self.lock().pending_empty_reads += count;
    }

    /// Simulate the device disappearing.
    pub fn set_disconnected(&self, disconnected: bool) {
        self.lock().disconnected = disconnected;
    }

    /// Get a copy of all data written to the port.
    pub fn get_write_log(&self) -> Vec<Vec<u8>> {
        self.lock().write_log.clone()
    }

    /// All written bytes concatenated, as they would appear on the wire.
    pub fn written_bytes(&self) -> Vec<u8> {
        self.lock().write_log.concat()
    }

    /// Number of times the input buffer was cleared.
    pub fn clear_count(&self) -> usize {
        self.lock().clear_count
    }

    /// Number of reads that delivered at least one byte.
    pub fn reads_served(&self) -> usize {
        self.lock().reads_served
    }

    /// Get the number of bytes available to read.
    pub fn available_bytes(&self) -> usize {
        self.lock().read_queue.len()
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        let mut state = self.lock();

        if state.disconnected {
            return Err(PortError::Io(std::io::ErrorKind::BrokenPipe.into()));
        }

        let accepted = state
            .write_chunk
            .map_or(data.len(), |chunk| chunk.min(data.len()));
        let chunk = &data[..accepted];

        state.write_log.push(chunk.to_vec());
        if state.echo {
            state.read_queue.extend(chunk);
        }

        Ok(accepted)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.lock();

        if state.disconnected {
            return Err(PortError::Io(std::io::ErrorKind::BrokenPipe.into()));
        }

        if state.pending_timeouts > 0 {
            state.pending_timeouts -= 1;
            return Err(PortError::timeout(READ_POLL_INTERVAL));
        }

        if state.pending_empty_reads > 0 {
            state.pending_empty_reads -= 1;
            return Ok(0);
        }

        let mut bytes_read = 0;
        for byte in buffer.iter_mut() {
            match state.read_queue.pop_front() {
                Some(queued) => {
                    *byte = queued;
                    bytes_read += 1;
                }
                None => break,
            }
        }

        if bytes_read == 0 {
            drop(state);
            std::thread::sleep(IDLE_BACKOFF);
            Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                "No data available",
            )))
        } else {
            state.reads_served += 1;
            Ok(bytes_read)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn clear_input(&mut self) -> Result<(), PortError> {
        let mut state = self.lock();
        state.read_queue.clear();
        state.clear_count += 1;
        Ok(())
    }

    fn bytes_to_read(&self) -> Option<usize> {
        Some(self.available_bytes())
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("available_bytes", &self.available_bytes())
            .finish()
    }
}
