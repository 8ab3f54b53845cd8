//! Top-level error type for the timer.
//!
//! Every failure the binary can report maps to one variant here, and each
//! variant maps to a process exit code.

use thiserror::Error;

use crate::parser::ParseError;
use crate::types::{SessionStatus, TimerDuration};

/// Exit code for a completed timer, `--help`, or `--version`.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for parse and configuration failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for command-line usage errors, including a missing expression.
pub const EXIT_USAGE: i32 = 2;

/// Exit code for a timer cancelled by SIGINT (128 + 2).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Errors that can occur while parsing, configuring, or running a timer.
#[derive(Debug, Error)]
pub enum TimerError {
    /// The time expression could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The user interrupted the countdown.
    #[error("タイマーがキャンセルされました（残り時間: {remaining}）")]
    Interrupted {
        /// Time left on the clock when the interrupt arrived
        remaining: TimerDuration,
    },

    /// A session operation was attempted in the wrong state.
    #[error("セッションが {from} 状態のため {action} できません")]
    InvalidTransition {
        /// Status at the time of the attempt
        from: SessionStatus,
        /// Attempted operation
        action: &'static str,
    },

    /// No time expression was given on the command line.
    #[error("時間を指定してください")]
    MissingExpression,

    /// The progress event receiver went away mid-countdown.
    #[error("イベントの送信に失敗しました")]
    EventChannelClosed,

    /// The command-line options are inconsistent.
    #[error("設定が不正です: {0}")]
    InvalidConfig(String),
}

impl TimerError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted { .. } => EXIT_INTERRUPTED,
            Self::MissingExpression => EXIT_USAGE,
            Self::Parse(_)
            | Self::InvalidTransition { .. }
            | Self::EventChannelClosed
            | Self::InvalidConfig(_) => EXIT_FAILURE,
        }
    }

    /// Returns a hint for the user, if one applies.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Parse(e) => Some(e.suggestion()),
            Self::MissingExpression => Some("例: timer 5m, timer 1h30m, timer 2:30"),
            _ => None,
        }
    }
}
