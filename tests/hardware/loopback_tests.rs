//! Round trips through a physically looped-back port.
//!
//! ```bash
//! export TEST_PORT=/dev/ttyUSB0   # TX and RX jumpered together
//! cargo test --features hardware-tests
//! ```

use serial_loopback::Session;
use std::env;

/// Skip test if hardware is not available.
fn skip_without_hardware() -> Option<String> {
    let port = env::var("TEST_PORT").ok();
    if port.is_none() {
        println!("Skipping hardware test: TEST_PORT not set");
    }
    port
}

#[test]
#[cfg_attr(not(feature = "hardware-tests"), ignore)]
fn jumpered_port_echoes_lines() {
    let Some(port_name) = skip_without_hardware() else {
        return;
    };

    let mut session = Session::open(&port_name).expect("TEST_PORT should open");
    for line in ["hello", "", "0123456789abcdefghijklmnopqrstuvwxyz"] {
        session.send(line).unwrap();
        assert_eq!(session.receive_line().unwrap(), format!("{line}\n"));
    }
}
