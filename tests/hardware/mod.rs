//! Tests that talk to real serial endpoints.
//!
//! - `loopback_tests`: a port with TX wired to RX (`TEST_PORT`)
//! - `pty_tests`: an in-process echo peer on a pseudo-terminal pair

pub mod loopback_tests;

#[cfg(unix)]
pub mod pty_tests;
