// Signal handling module
//
// Only the interrupt signal (SIGINT / Ctrl+C) is observed. It stops the
// server immediately; in-flight requests are not drained.

use std::io;

/// Subscription to the process interrupt signal
///
/// The OS handler is installed when the subscription is created, so
/// interrupts that arrive before the first `recv` are not lost.
pub struct Interrupt {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
    #[cfg(not(unix))]
    inner: tokio::signal::windows::CtrlC,
}

impl Interrupt {
    /// Register for SIGINT (Unix)
    #[cfg(unix)]
    pub fn subscribe() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            inner: signal(SignalKind::interrupt())?,
        })
    }

    /// Register for Ctrl+C (Windows)
    #[cfg(not(unix))]
    pub fn subscribe() -> io::Result<Self> {
        Ok(Self {
            inner: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Wait for the next interrupt
    pub async fn recv(&mut self) {
        self.inner.recv().await;
    }
}
