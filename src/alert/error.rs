//! Completion alert error types.
//!
//! Alerts are best effort: none of these errors changes the exit code of
//! the timer. They exist so failures can be logged with a useful hint.

use thiserror::Error;

/// Errors that can occur while signalling completion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// The notification tool is not installed.
    #[error("通知コマンドが見つかりません: {0}")]
    CommandNotFound(String),

    /// The notification tool ran but reported failure.
    #[error("通知コマンド '{0}' の実行に失敗しました: {1}")]
    ExecutionFailed(String, String),

    /// The alert did not finish in time.
    #[error("{0} がタイムアウトしました（{1}秒）")]
    Timeout(&'static str, u64),

    /// Desktop notifications are not supported on this platform.
    #[error("このプラットフォームはデスクトップ通知に対応していません")]
    Unsupported,

    /// No audio output device is available.
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Audio playback failed.
    #[error("サウンド再生エラー: {0}")]
    PlaybackError(String),

    /// Writing to the terminal failed.
    #[error("端末への出力に失敗しました: {0}")]
    Io(String),

    /// The blocking alert task panicked or was cancelled.
    #[error("通知タスクの実行エラー: {0}")]
    Task(String),
}

impl AlertError {
    /// Returns true if the failure only means the alert is unavailable here.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::CommandNotFound(_) | Self::Unsupported | Self::DeviceNotAvailable(_)
        )
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::CommandNotFound(_) | Self::Unsupported => {
                "--no-notify でデスクトップ通知を無効にできます"
            }
            Self::ExecutionFailed(_, _) => "通知の設定を確認してください",
            Self::Timeout(_, _) => "通知サービスが応答しているか確認してください",
            Self::DeviceNotAvailable(_) | Self::PlaybackError(_) => {
                "オーディオ設定を確認してください"
            }
            Self::Io(_) => "--no-bell でベルを無効にできます",
            Self::Task(_) => "アプリケーションを再起動してください",
        }
    }
}
