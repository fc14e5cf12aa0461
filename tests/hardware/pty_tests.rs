//! End-to-end run over a pseudo-terminal with an echoing peer thread.

use serial_loopback::port::SyncSerialPort;
use serial_loopback::repl::{self, LoopOutcome};
use serial_loopback::Session;
use serialport::{SerialPort, TTYPort};
use std::io::{ErrorKind, Read, Write};
use std::os::unix::io::AsRawFd;
use std::thread;

/// Put the slave side in raw mode so the line discipline neither echoes nor buffers.
fn make_raw(port: &TTYPort) {
    let fd = port.as_raw_fd();
    // SAFETY: `fd` is a valid open tty for the lifetime of `port`.
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        assert_eq!(libc::tcgetattr(fd, &mut termios), 0);
        libc::cfmakeraw(&mut termios);
        assert_eq!(libc::tcsetattr(fd, libc::TCSANOW, &termios), 0);
    }
}

/// Echo everything written to `master` back to the slave side, until `lines` lines have passed.
fn spawn_echo_peer(mut master: TTYPort, lines: usize) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut seen = 0;
        let mut buf = [0u8; 64];
        while seen < lines {
            match master.read(&mut buf) {
                Ok(n) => {
                    seen += buf[..n].iter().filter(|&&b| b == b'\n').count();
                    master.write_all(&buf[..n]).unwrap();
                }
                Err(e) if e.kind() == ErrorKind::TimedOut => continue,
                Err(e) => panic!("echo peer failed: {e}"),
            }
        }
    })
}

#[test]
#[cfg_attr(not(feature = "hardware-tests"), ignore)]
fn interactive_loop_over_pty() {
    let (master, slave) = TTYPort::pair().expect("pty pair");
    make_raw(&slave);
    let name = slave.name().unwrap_or_else(|| "pty".to_string());
    let peer = spawn_echo_peer(master, 2);

    let mut session = Session::with_port(SyncSerialPort::from_raw(Box::new(slave), name));
    let mut transcript = Vec::new();
    let outcome = repl::run(&mut session, &b"first\nsecond\nbye\n"[..], &mut transcript).unwrap();
    peer.join().unwrap();

    let transcript = String::from_utf8(transcript).unwrap();
    assert_eq!(outcome, LoopOutcome::Bye);
    assert!(transcript.contains("Serial reply: first\n"));
    assert!(transcript.contains("Serial reply: second\n"));
}
