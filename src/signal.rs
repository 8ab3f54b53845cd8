//! Interrupt handling for the countdown.
//!
//! Handlers are installed up front with [`Interrupt::install`] so a Ctrl+C
//! that arrives right after startup is never lost. [`Interrupt::wait`]
//! borrows the listeners, so the same `Interrupt` cancels the countdown and
//! later cuts the completion alerts short. Once installed, the default
//! signal action is never restored, so every phase must keep waiting on it.

use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c, CtrlBreak, CtrlC};

/// Installed interrupt listeners (SIGINT/SIGTERM, or Ctrl+C/Ctrl+Break).
#[derive(Debug)]
pub struct Interrupt {
    #[cfg(unix)]
    sigint: Signal,
    #[cfg(unix)]
    sigterm: Signal,
    #[cfg(windows)]
    ctrl_c: CtrlC,
    #[cfg(windows)]
    ctrl_break: CtrlBreak,
}

impl Interrupt {
    /// Installs the signal listeners.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system refuses the handler.
    #[cfg(unix)]
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            sigint: signal(SignalKind::interrupt())?,
            sigterm: signal(SignalKind::terminate())?,
        })
    }

    /// Installs the console control listeners.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system refuses the handler.
    #[cfg(windows)]
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: ctrl_c()?,
            ctrl_break: ctrl_break()?,
        })
    }

    /// Resolves when the first interrupt arrives.
    #[cfg(unix)]
    pub async fn wait(&mut self) {
        tokio::select! {
            _ = self.sigint.recv() => info!("Received SIGINT"),
            _ = self.sigterm.recv() => info!("Received SIGTERM"),
        }
    }

    /// Resolves when the first interrupt arrives.
    #[cfg(windows)]
    pub async fn wait(&mut self) {
        tokio::select! {
            _ = self.ctrl_c.recv() => info!("Received Ctrl+C"),
            _ = self.ctrl_break.recv() => info!("Received Ctrl+Break"),
        }
    }
}
