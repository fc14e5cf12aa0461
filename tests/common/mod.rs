//! Shared test utilities for serial loopback tests.
//!
//! - Mock-backed sessions (plain and loopback)
//! - Scripted runs of the interactive loop

#![allow(dead_code)]

use serial_loopback::error::AppResult;
use serial_loopback::port::MockSerialPort;
use serial_loopback::repl::{self, LoopOutcome};
use serial_loopback::Session;

/// A session over a mock port, plus a second handle onto the same mock.
pub fn mock_session(port_name: &str) -> (Session<MockSerialPort>, MockSerialPort) {
    let mock = MockSerialPort::new(port_name);
    (Session::with_port(mock.clone()), mock)
}

/// Like [`mock_session`], but the mock echoes every write back.
pub fn loopback_session(port_name: &str) -> (Session<MockSerialPort>, MockSerialPort) {
    let mock = MockSerialPort::loopback(port_name);
    (Session::with_port(mock.clone()), mock)
}

/// Feed `operator_input` to the loop and capture what it printed.
pub fn run_script(
    session: &mut Session<MockSerialPort>,
    operator_input: &str,
) -> (AppResult<LoopOutcome>, String) {
    let mut transcript = Vec::new();
    let outcome = repl::run(session, operator_input.as_bytes(), &mut transcript);
    (outcome, String::from_utf8(transcript).expect("transcript is UTF-8"))
}
