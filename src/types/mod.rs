//! Core data types for the timer.
//!
//! This module defines the data structures used for:
//! - Resolved durations and their `H:MM:SS` / `MM:SS` rendering
//! - Timer session state management
//! - Timer configuration with validation

use std::fmt;

use crate::error::TimerError;

/// Maximum length of the completion message in characters.
pub const MAX_MESSAGE_LENGTH: usize = 100;

// ============================================================================
// TimerDuration
// ============================================================================

/// A non-negative count of whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerDuration(u64);

impl TimerDuration {
    /// Zero seconds. Completes immediately.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from whole seconds.
    pub const fn from_secs(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the number of whole seconds.
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns true if the duration is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Splits the duration into (hours, minutes, seconds).
    pub const fn to_hms(&self) -> (u64, u64, u64) {
        (self.0 / 3600, (self.0 % 3600) / 60, self.0 % 60)
    }

    /// Subtracts, clamping at zero.
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for TimerDuration {
    /// Formats as `H:MM:SS` when at least one hour remains, otherwise `MM:SS`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds) = self.to_hms();
        if hours > 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{:02}:{:02}", minutes, seconds)
        }
    }
}

// ============================================================================
// SessionStatus
// ============================================================================

/// Lifecycle status of a timer session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Parsed, not yet started
    #[default]
    Pending,
    /// Counting down
    Running,
    /// Reached zero
    Completed,
    /// Interrupted by the user
    Cancelled,
}

impl SessionStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Running => "running",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerSession
// ============================================================================

/// Runtime state of a single countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSession {
    duration: TimerDuration,
    elapsed: TimerDuration,
    status: SessionStatus,
}

impl TimerSession {
    /// Creates a pending session for the given duration.
    pub fn new(duration: TimerDuration) -> Self {
        Self {
            duration,
            elapsed: TimerDuration::ZERO,
            status: SessionStatus::Pending,
        }
    }

    /// Moves the session from `Pending` to `Running`.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidTransition` if the session was already started.
    pub fn start(&mut self) -> Result<(), TimerError> {
        self.transition(SessionStatus::Pending, SessionStatus::Running, "start")
    }

    /// Sets elapsed time to `elapsed`, clamped to the session duration.
    ///
    /// Elapsed time never moves backwards. Returns true once the countdown
    /// has reached zero.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidTransition` unless the session is running.
    pub fn advance_to(&mut self, elapsed: TimerDuration) -> Result<bool, TimerError> {
        if self.status != SessionStatus::Running {
            return Err(TimerError::InvalidTransition {
                from: self.status,
                action: "tick",
            });
        }
        self.elapsed = self.elapsed.max(elapsed.min(self.duration));
        Ok(self.remaining().is_zero())
    }

    /// Marks a running session whose remaining time is zero as completed.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidTransition` if the session is not running
    /// or time remains.
    pub fn complete(&mut self) -> Result<(), TimerError> {
        if !self.remaining().is_zero() {
            return Err(TimerError::InvalidTransition {
                from: self.status,
                action: "complete",
            });
        }
        self.transition(SessionStatus::Running, SessionStatus::Completed, "complete")
    }

    /// Cancels a pending or running session.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidTransition` if the session already finished.
    pub fn cancel(&mut self) -> Result<(), TimerError> {
        if self.status.is_terminal() {
            return Err(TimerError::InvalidTransition {
                from: self.status,
                action: "cancel",
            });
        }
        self.status = SessionStatus::Cancelled;
        Ok(())
    }

    /// Returns the target duration.
    pub fn duration(&self) -> TimerDuration {
        self.duration
    }

    /// Returns the elapsed time.
    pub fn elapsed(&self) -> TimerDuration {
        self.elapsed
    }

    /// Returns the remaining time.
    pub fn remaining(&self) -> TimerDuration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    fn transition(
        &mut self,
        from: SessionStatus,
        to: SessionStatus,
        action: &'static str,
    ) -> Result<(), TimerError> {
        if self.status != from {
            return Err(TimerError::InvalidTransition {
                from: self.status,
                action,
            });
        }
        self.status = to;
        Ok(())
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// User-selectable timer behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Message shown on completion
    pub message: Option<String>,
    /// Ring the terminal bell on completion
    pub bell: bool,
    /// Send a desktop notification on completion
    pub notify: bool,
    /// Play a tone on completion (requires the `sound` feature)
    pub sound: bool,
    /// Suppress per-tick progress output
    pub quiet: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            message: None,
            bell: true,
            notify: true,
            sound: false,
            quiet: false,
        }
    }
}

impl TimerConfig {
    /// Sets the completion message.
    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Enables or disables the terminal bell.
    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    /// Enables or disables the desktop notification.
    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }

    /// Enables or disables the completion tone.
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    /// Enables or disables quiet mode.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidConfig` if the message is empty or too long.
    pub fn validate(&self) -> Result<(), TimerError> {
        if let Some(message) = &self.message {
            if message.trim().is_empty() {
                return Err(TimerError::InvalidConfig(
                    "メッセージは空にできません".to_string(),
                ));
            }
            if message.chars().count() > MAX_MESSAGE_LENGTH {
                return Err(TimerError::InvalidConfig(format!(
                    "メッセージは{}文字以内にしてください",
                    MAX_MESSAGE_LENGTH
                )));
            }
        }
        Ok(())
    }

    /// Returns the completion message, or the default one.
    pub fn completion_message(&self) -> &str {
        self.message.as_deref().unwrap_or("時間になりました")
    }
}

// ============================================================================
// Tests
// ============================================================================
