//! Display utilities for the timer CLI.
//!
//! This module provides formatted output for:
//! - Countdown progress (in-place on a terminal, one line per tick otherwise)
//! - Completion and cancellation messages
//! - Error messages

use std::io::{self, IsTerminal, Write};

use tokio::sync::mpsc;

use crate::countdown::TimerEvent;
use crate::types::TimerDuration;

/// Clears from the cursor to the end of the line.
const CLEAR_TO_EOL: &str = "\x1b[K";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the completion message.
    pub fn show_completed(message: &str) {
        println!("* {}", message);
    }

    /// Shows the cancellation message.
    pub fn show_cancelled(remaining: TimerDuration) {
        eprintln!("[] タイマーをキャンセルしました（残り時間: {}）", remaining);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows a hint below an error.
    pub fn show_hint(hint: &str) {
        eprintln!("  ヒント: {}", hint);
    }

    /// Formats the start line.
    fn format_start(total: TimerDuration) -> String {
        format!("* タイマーを開始しました: {}", total)
    }

    /// Formats a progress line.
    fn format_remaining(remaining: TimerDuration) -> String {
        format!("残り時間: {}", remaining)
    }
}

// ============================================================================
// ProgressPrinter
// ============================================================================

/// How countdown progress is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Redraw a single line with carriage returns
    InPlace,
    /// Print one line per event
    Lines,
    /// Print nothing
    Quiet,
}

impl ProgressMode {
    /// Chooses the mode for stdout.
    pub fn detect(quiet: bool) -> Self {
        if quiet {
            ProgressMode::Quiet
        } else if io::stdout().is_terminal() {
            ProgressMode::InPlace
        } else {
            ProgressMode::Lines
        }
    }
}

/// Renders `TimerEvent`s as progress output.
#[derive(Debug)]
pub struct ProgressPrinter {
    mode: ProgressMode,
    /// An in-place line has been drawn without a trailing newline
    line_open: bool,
}

impl ProgressPrinter {
    /// Creates a printer with the given mode.
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            mode,
            line_open: false,
        }
    }

    /// Consumes events until the channel closes, writing to stdout.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<TimerEvent>) -> io::Result<()> {
        while let Some(event) = rx.recv().await {
            let mut stdout = io::stdout().lock();
            self.render(&mut stdout, &event)?;
        }
        Ok(())
    }

    /// Writes the output for one event.
    pub fn render<W: Write>(&mut self, out: &mut W, event: &TimerEvent) -> io::Result<()> {
        match (self.mode, event) {
            (ProgressMode::Quiet, _) => return Ok(()),

            (_, TimerEvent::Started { total }) => {
                writeln!(out, "{}", Display::format_start(*total))?;
                if !total.is_zero() {
                    self.draw(out, *total)?;
                }
            }
            (_, TimerEvent::Tick { remaining }) => self.draw(out, *remaining)?,
            (_, TimerEvent::Completed | TimerEvent::Cancelled { .. }) => {
                if self.line_open {
                    writeln!(out)?;
                    self.line_open = false;
                }
            }
        }
        out.flush()
    }

    fn draw<W: Write>(&mut self, out: &mut W, remaining: TimerDuration) -> io::Result<()> {
        let line = Display::format_remaining(remaining);
        match self.mode {
            ProgressMode::InPlace => {
                write!(out, "\r{}{}", line, CLEAR_TO_EOL)?;
                self.line_open = true;
            }
            ProgressMode::Lines => writeln!(out, "{}", line)?,
            ProgressMode::Quiet => {}
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
