//! Completion alerts for the timer.
//!
//! When a countdown reaches zero the timer signals completion through every
//! enabled alert:
//!
//! - Terminal bell (BEL on stdout)
//! - Desktop notification (`osascript` / `notify-send`)
//! - Tone through the audio device (`sound` feature)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ CompletionAlerts │ ← spawn_blocking + timeout per alert
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   dyn Alert      │────▶│  TerminalBell    │
//! │                  │────▶│  DesktopNotifier │
//! │                  │────▶│  ToneAlert       │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! Alerts are best effort. Failures are logged and returned to the caller
//! but never turn a completed timer into a failed one.

mod desktop;
mod error;
#[cfg(feature = "sound")]
mod tone;

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

pub use desktop::DesktopNotifier;
pub use error::AlertError;
#[cfg(feature = "sound")]
pub use tone::ToneAlert;

use crate::types::TimerConfig;

/// Default time limit for a single alert.
pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_secs(5);

/// Title used for notifications.
pub const ALERT_TITLE: &str = "timer";

/// ASCII bell character.
const BEL: &[u8] = b"\x07";

/// A way of telling the user the timer finished.
///
/// Implementations may block; they are run on tokio's blocking pool.
pub trait Alert: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Signals completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered.
    fn fire(&self, title: &str, message: &str) -> Result<(), AlertError>;
}

// ============================================================================
// TerminalBell
// ============================================================================

/// Rings the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Alert for TerminalBell {
    fn name(&self) -> &'static str {
        "bell"
    }

    fn fire(&self, _title: &str, _message: &str) -> Result<(), AlertError> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(BEL)
            .and_then(|()| stdout.flush())
            .map_err(|e| AlertError::Io(e.to_string()))
    }
}

// ============================================================================
// CompletionAlerts
// ============================================================================

/// The set of alerts fired when a countdown completes.
pub struct CompletionAlerts {
    alerts: Vec<Arc<dyn Alert>>,
    timeout: Duration,
}

impl CompletionAlerts {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            timeout: DEFAULT_ALERT_TIMEOUT,
        }
    }

    /// Creates the alerts enabled in `config`.
    #[must_use]
    pub fn from_config(config: &TimerConfig) -> Self {
        let mut alerts = Self::new();

        if config.bell {
            alerts = alerts.with_alert(Arc::new(TerminalBell));
        }
        if config.notify {
            alerts = alerts.with_alert(Arc::new(DesktopNotifier::new()));
        }
        if config.sound {
            #[cfg(feature = "sound")]
            {
                alerts = alerts.with_alert(Arc::new(ToneAlert::new()));
            }
            #[cfg(not(feature = "sound"))]
            warn!("Sound support is not compiled in; rebuild with --features sound");
        }

        alerts
    }

    /// Adds an alert.
    #[must_use]
    pub fn with_alert(mut self, alert: Arc<dyn Alert>) -> Self {
        self.alerts.push(alert);
        self
    }

    /// Sets the per-alert time limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the names of the configured alerts, in firing order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.alerts.iter().map(|a| a.name()).collect()
    }

    /// Returns true if no alert is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Fires every alert in order and returns the failures.
    ///
    /// Each alert runs on the blocking pool under the configured timeout.
    /// Unavailable alerts are logged at debug level, other failures as
    /// warnings.
    pub async fn fire(&self, message: &str) -> Vec<AlertError> {
        let mut failures = Vec::new();

        for alert in &self.alerts {
            let name = alert.name();
            let task = tokio::task::spawn_blocking({
                let alert = Arc::clone(alert);
                let message = message.to_string();
                move || alert.fire(ALERT_TITLE, &message)
            });

            let result = match timeout(self.timeout, task).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => Err(AlertError::Task(e.to_string())),
                Err(_) => Err(AlertError::Timeout(name, self.timeout.as_secs())),
            };

            match result {
                Ok(()) => debug!("Alert '{}' delivered", name),
                Err(e) => {
                    if e.is_unavailable() {
                        debug!("Alert '{}' unavailable: {}", name, e);
                    } else {
                        warn!("Alert '{}' failed: {} ({})", name, e, e.suggestion());
                    }
                    failures.push(e);
                }
            }
        }

        failures
    }
}

impl Default for CompletionAlerts {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MockAlert
// ============================================================================

/// Mock alert for testing.
#[derive(Debug, Default)]
pub struct MockAlert {
    fire_calls: Mutex<Vec<(String, String)>>,
    should_fail: AtomicBool,
    delay: Option<Duration>,
}

impl MockAlert {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call block for `delay` before returning.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn fire_count(&self) -> usize {
        self.fire_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_fire_calls(&self) -> Vec<(String, String)> {
        self.fire_calls.lock().unwrap().clone()
    }
}

impl Alert for MockAlert {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn fire(&self, title: &str, message: &str) -> Result<(), AlertError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AlertError::ExecutionFailed(
                "mock".to_string(),
                "Mock failure".to_string(),
            ));
        }
        self.fire_calls
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
