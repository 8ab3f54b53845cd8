//! Time expression parse errors.

use thiserror::Error;

/// Errors produced when a time expression matches no recognized grammar.
///
/// Every variant echoes the offending input back to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The expression is empty or whitespace only.
    #[error("時間が指定されていません: '{input}'")]
    Empty {
        /// Offending input, untrimmed
        input: String,
    },

    /// The expression is a negative number.
    #[error("負の時間は指定できません: '{input}'")]
    Negative {
        /// Offending input
        input: String,
    },

    /// The expression matches none of the accepted formats.
    #[error("時間の形式が正しくありません: '{input}'")]
    InvalidFormat {
        /// Offending input
        input: String,
    },

    /// A clock component after the first is 60 or more.
    #[error("'{input}' の {component} は0-59の範囲で指定してください")]
    OutOfRange {
        /// Offending input
        input: String,
        /// Which component ("分" or "秒")
        component: &'static str,
    },

    /// The total does not fit in 64-bit seconds.
    #[error("時間が大きすぎます: '{input}'")]
    Overflow {
        /// Offending input
        input: String,
    },
}

impl ParseError {
    /// Returns the offending input.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::Empty { input }
            | Self::Negative { input }
            | Self::InvalidFormat { input }
            | Self::OutOfRange { input, .. }
            | Self::Overflow { input } => input,
        }
    }

    /// Returns a user-friendly hint listing the accepted formats.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "時計形式は H:MM:SS または MM:SS で指定してください（例: 1:02:03, 2:30）",
            Self::Overflow { .. } => "もっと短い時間を指定してください",
            Self::Empty { .. } | Self::Negative { .. } | Self::InvalidFormat { .. } => {
                "例: 90（秒）, 5m, 1h30m, 2:30, 1:02:03"
            }
        }
    }
}
