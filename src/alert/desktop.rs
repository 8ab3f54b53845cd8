//! Desktop notifications through the platform's command-line tool.
//!
//! - macOS: `osascript -e 'display notification ...'`
//! - Other Unix: `notify-send`
//!
//! The command runs synchronously; [`super::CompletionAlerts`] puts it on a
//! blocking task with a timeout.

use std::io::ErrorKind;
use std::process::Command;

use tracing::debug;

use super::error::AlertError;
use super::Alert;

/// Command-line tool used on macOS.
#[cfg(target_os = "macos")]
const NOTIFY_PROGRAM: &str = "osascript";

/// Command-line tool used on other Unix systems.
#[cfg(all(unix, not(target_os = "macos")))]
const NOTIFY_PROGRAM: &str = "notify-send";

/// Sends a desktop notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    /// Creates a new notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the notification command for this platform.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Unsupported` where no notification tool is known.
    #[cfg(target_os = "macos")]
    pub fn command(title: &str, message: &str) -> Result<Command, AlertError> {
        let script = format!(
            "display notification \"{}\" with title \"{}\" sound name \"Glass\"",
            applescript_escape(message),
            applescript_escape(title)
        );
        let mut command = Command::new(NOTIFY_PROGRAM);
        command.arg("-e").arg(script);
        Ok(command)
    }

    /// Builds the notification command for this platform.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Unsupported` where no notification tool is known.
    #[cfg(all(unix, not(target_os = "macos")))]
    pub fn command(title: &str, message: &str) -> Result<Command, AlertError> {
        let mut command = Command::new(NOTIFY_PROGRAM);
        command.arg("--app-name=timer").arg(title).arg(message);
        Ok(command)
    }

    /// Builds the notification command for this platform.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Unsupported` where no notification tool is known.
    #[cfg(not(unix))]
    pub fn command(_title: &str, _message: &str) -> Result<Command, AlertError> {
        Err(AlertError::Unsupported)
    }
}

impl Alert for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn fire(&self, title: &str, message: &str) -> Result<(), AlertError> {
        let mut command = Self::command(title, message)?;
        let program = command.get_program().to_string_lossy().into_owned();
        debug!("Sending desktop notification with {}", program);

        let output = command.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AlertError::CommandNotFound(program.clone())
            } else {
                AlertError::ExecutionFailed(program.clone(), e.to_string())
            }
        })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AlertError::ExecutionFailed(
                program,
                stderr.trim().to_string(),
            ))
        }
    }
}

/// Escapes a string for use inside an AppleScript string literal.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
