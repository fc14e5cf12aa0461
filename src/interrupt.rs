//! Operator interrupt handling.
//!
//! The session itself is synchronous, so Ctrl+C is watched from a dedicated
//! thread running a current-thread tokio runtime. The signal handler is
//! registered before [`install`] returns.

use std::io;
use std::thread::{self, JoinHandle};
use tokio::runtime::{Builder, Runtime};

#[cfg(unix)]
struct Listener(tokio::signal::unix::Signal);

#[cfg(unix)]
impl Listener {
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::interrupt()).map(Self)
    }

    async fn recv(&mut self) -> Option<()> {
        self.0.recv().await
    }
}

#[cfg(windows)]
struct Listener(tokio::signal::windows::CtrlC);

#[cfg(windows)]
impl Listener {
    fn register() -> io::Result<Self> {
        tokio::signal::windows::ctrl_c().map(Self)
    }

    async fn recv(&mut self) -> Option<()> {
        self.0.recv().await
    }
}

fn runtime() -> io::Result<Runtime> {
    Builder::new_current_thread().enable_io().build()
}

/// Run `on_interrupt` once, on a background thread, when Ctrl+C arrives.
///
/// `on_interrupt` is expected to terminate the process; resources held by the
/// main thread are not released.
pub fn install<F>(on_interrupt: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    let runtime = runtime()?;
    let mut listener = runtime.block_on(async { Listener::register() })?;

    thread::Builder::new()
        .name("interrupt-watcher".into())
        .spawn(move || {
            if runtime.block_on(listener.recv()).is_some() {
                tracing::debug!("interrupt received");
                on_interrupt();
            }
        })
}
