//! timer - A minimalist command-line timer
//!
//! Counts down a human-friendly duration and signals completion:
//! - `timer 90` / `timer 5m` / `timer 1h30m` / `timer 2:30`
//! - Progress is printed every second
//! - Ctrl+C cancels the countdown

use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::warn;

use minimal_timer::alert::CompletionAlerts;
use minimal_timer::cli::{requested_help, Cli, Display, ProgressMode, ProgressPrinter};
use minimal_timer::countdown::Countdown;
use minimal_timer::error::{TimerError, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS};
use minimal_timer::parser::parse_duration;
use minimal_timer::signal::Interrupt;
use minimal_timer::types::TimerDuration;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Help wins over everything else, including invalid arguments
    if let Some(help) = requested_help(std::env::args_os()) {
        let code = match help.print() {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        };
        std::process::exit(code);
    }

    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    let code = match execute(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report(&e),
    };

    // Exit without waiting on alert tasks that outlived their timeout
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Parses the expression, runs the countdown, and fires completion alerts.
async fn execute(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    let Some(expression) = cli.time_expression() else {
        Cli::command().write_help(&mut io::stderr())?;
        return Err(TimerError::MissingExpression.into());
    };

    let config = cli.to_config();

    let duration = parse_duration(&expression).map_err(TimerError::from)?;

    let mut interrupt = Interrupt::install().context("シグナルハンドラの登録に失敗しました")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = ProgressPrinter::new(ProgressMode::detect(config.quiet));
    let display = tokio::spawn(printer.run(rx));

    let result = Countdown::new(duration, tx).run(interrupt.wait()).await;

    // The sender is gone once the countdown returns, so the printer drains and stops
    match display.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("Failed to write progress: {}", e),
        Err(e) => warn!("Progress display task failed: {}", e),
    }

    result?;

    let message = config.completion_message();
    Display::show_completed(message);

    // A slow notifier must not swallow Ctrl+C
    let alerts = CompletionAlerts::from_config(&config);
    tokio::select! {
        _ = alerts.fire(message) => Ok(()),
        () = interrupt.wait() => Err(anyhow::Error::from(TimerError::Interrupted {
            remaining: TimerDuration::ZERO,
        })),
    }
}

/// Prints the error and returns the exit code for it.
fn report(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<TimerError>() {
        Some(TimerError::Interrupted { remaining }) => {
            Display::show_cancelled(*remaining);
            EXIT_INTERRUPTED
        }
        Some(e) => {
            Display::show_error(&e.to_string());
            if let Some(hint) = e.suggestion() {
                Display::show_hint(hint);
            }
            e.exit_code()
        }
        None => {
            Display::show_error(&format!("{:#}", error));
            EXIT_FAILURE
        }
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
