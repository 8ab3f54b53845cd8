//! Minimal Timer Library
//!
//! This library provides the core functionality for the `timer` CLI.
//! It includes:
//! - Smart time expression parsing (`90`, `5m`, `1h30m`, `2:30`, `1:02:03`)
//! - Countdown runner with per-second progress events
//! - Completion alerts (terminal bell, desktop notification, optional tone)
//! - Interrupt handling for cancelling a running countdown
//! - CLI argument parsing and display utilities

pub mod alert;
pub mod cli;
pub mod countdown;
pub mod error;
pub mod parser;
pub mod signal;
pub mod types;

// Re-export commonly used types for convenience
pub use alert::{Alert, AlertError, CompletionAlerts, DesktopNotifier, MockAlert, TerminalBell};
pub use countdown::{Countdown, TimerEvent};
pub use error::TimerError;
pub use parser::{parse_duration, ParseError};
pub use signal::Interrupt;
pub use types::{SessionStatus, TimerConfig, TimerDuration, TimerSession};
