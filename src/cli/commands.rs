//! Command definitions for the timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::ffi::OsStr;

use clap::{CommandFactory, Parser};

use crate::types::TimerConfig;

const EXAMPLES: &str = "\
例:
  timer 90          90秒
  timer 5m          5分
  timer 1h30m       1時間30分
  timer 1h 30m      1時間30分
  timer 2:30        2分30秒
  timer 1:02:03     1時間2分3秒
  timer 25m -m \"休憩しましょう\"";

// ============================================================================
// CLI Structure
// ============================================================================

/// Minimalist command-line timer with smart time parsing
#[derive(Parser, Debug)]
#[command(
    name = "timer",
    version,
    about = "スマートな時間指定に対応したミニマルなコマンドラインタイマー",
    long_about = "指定した時間をカウントダウンし、終了時にベルとデスクトップ通知でお知らせします。\n\
                  時間は秒数、単位付き（h/m/s）、時計形式（H:MM:SS, MM:SS）で指定できます。",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Time expression: 90, 5m, 1h30m, 2:30, 1:02:03
    #[arg(value_name = "TIME", allow_negative_numbers = true)]
    pub expression: Vec<String>,

    /// Message shown when the timer finishes
    #[arg(short, long, value_parser = validate_message)]
    pub message: Option<String>,

    /// Do not print the countdown progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not ring the terminal bell on completion
    #[arg(long)]
    pub no_bell: bool,

    /// Do not send a desktop notification on completion
    #[arg(long)]
    pub no_notify: bool,

    /// Play a tone on completion (requires the `sound` feature)
    #[arg(long)]
    pub sound: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    /// Returns the time expression, joining multiple words with a space.
    ///
    /// Returns `None` only when no word was given at all.
    pub fn time_expression(&self) -> Option<String> {
        if self.expression.is_empty() {
            None
        } else {
            Some(self.expression.join(" "))
        }
    }

    /// Builds the timer configuration from the parsed flags.
    pub fn to_config(&self) -> TimerConfig {
        TimerConfig::default()
            .with_message(self.message.clone())
            .with_bell(!self.no_bell)
            .with_notify(!self.no_notify)
            .with_sound(self.sound)
            .with_quiet(self.quiet)
    }
}

/// Which help text was asked for on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpRequest {
    /// `-h`: the short summary
    Short,
    /// `--help`: the summary plus the long description
    Long,
}

impl HelpRequest {
    /// Prints the matching help text to stdout.
    pub fn print(self) -> std::io::Result<()> {
        let mut cmd = Cli::command();
        match self {
            Self::Short => cmd.print_help(),
            Self::Long => cmd.print_long_help(),
        }
    }
}

/// Finds `-h` or `--help` before any `--` separator.
///
/// The first item is the program name and is skipped. Help takes priority
/// over every other argument, valid or not, and `--help` wins over `-h`.
pub fn requested_help<I, S>(args: I) -> Option<HelpRequest>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .skip(1)
        .map(|arg| arg.as_ref().to_os_string())
        .take_while(|arg| arg != "--")
        .filter_map(|arg| {
            if arg == "--help" {
                Some(HelpRequest::Long)
            } else if arg == "-h" {
                Some(HelpRequest::Short)
            } else {
                None
            }
        })
        .max_by_key(|request| *request == HelpRequest::Long)
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the completion message with the same rules as
/// [`TimerConfig::validate`].
fn validate_message(s: &str) -> Result<String, String> {
    TimerConfig::default()
        .with_message(Some(s.to_string()))
        .validate()
        .map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["timer"]);
            assert!(cli.expression.is_empty());
            assert!(cli.time_expression().is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_expression() {
            let cli = Cli::parse_from(["timer", "5m"]);
            assert_eq!(cli.time_expression(), Some("5m".to_string()));
        }

        #[test]
        fn test_parse_multiple_words() {
            let cli = Cli::parse_from(["timer", "1h", "30m"]);
            assert_eq!(cli.time_expression(), Some("1h 30m".to_string()));
        }

        #[test]
        fn test_parse_empty_expression() {
            let cli = Cli::parse_from(["timer", ""]);
            assert_eq!(cli.time_expression(), Some(String::new()));
        }

        #[test]
        fn test_parse_negative_number() {
            let cli = Cli::parse_from(["timer", "-5"]);
            assert_eq!(cli.time_expression(), Some("-5".to_string()));
        }

        #[test]
        fn test_parse_flags_after_expression() {
            let cli = Cli::parse_from(["timer", "2:30", "--quiet", "--no-bell"]);
            assert_eq!(cli.time_expression(), Some("2:30".to_string()));
            assert!(cli.quiet);
            assert!(cli.no_bell);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["timer", "--verbose", "5"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_short_flags() {
            let cli = Cli::parse_from(["timer", "-v", "-q", "-m", "Tea", "5m"]);
            assert!(cli.verbose);
            assert!(cli.quiet);
            assert_eq!(cli.message, Some("Tea".to_string()));
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["timer", "--completions", "bash"]);
            assert_eq!(cli.completions, Some(clap_complete::Shell::Bash));
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["timer", "--completions", "zsh"]);
            assert_eq!(cli.completions, Some(clap_complete::Shell::Zsh));
        }
    }

    // ------------------------------------------------------------------------
    // Config Tests
    // ------------------------------------------------------------------------

    mod config_tests {
        use super::*;

        #[test]
        fn test_to_config_defaults() {
            let config = Cli::parse_from(["timer", "5m"]).to_config();
            assert_eq!(config, TimerConfig::default());
        }

        #[test]
        fn test_to_config_all_options() {
            let cli = Cli::parse_from([
                "timer",
                "5m",
                "--message",
                "Tea",
                "--quiet",
                "--no-bell",
                "--no-notify",
                "--sound",
            ]);
            let config = cli.to_config();
            assert_eq!(config.message, Some("Tea".to_string()));
            assert!(config.quiet);
            assert!(!config.bell);
            assert!(!config.notify);
            assert!(config.sound);
        }
    }

    // ------------------------------------------------------------------------
    // Help Detection Tests
    // ------------------------------------------------------------------------

    mod requested_help_tests {
        use super::*;

        #[test]
        fn test_long_help() {
            assert_eq!(
                requested_help(["timer", "--help"]),
                Some(HelpRequest::Long)
            );
        }

        #[test]
        fn test_short_help() {
            assert_eq!(requested_help(["timer", "-h"]), Some(HelpRequest::Short));
        }

        #[test]
        fn test_long_help_wins_over_short() {
            assert_eq!(
                requested_help(["timer", "-h", "--help"]),
                Some(HelpRequest::Long)
            );
            assert_eq!(
                requested_help(["timer", "--help", "-h"]),
                Some(HelpRequest::Long)
            );
        }

        #[test]
        fn test_help_with_other_arguments() {
            assert_eq!(
                requested_help(["timer", "abc", "--bogus", "--help"]),
                Some(HelpRequest::Long)
            );
            assert_eq!(
                requested_help(["timer", "5m", "-h", "-q"]),
                Some(HelpRequest::Short)
            );
        }

        #[test]
        fn test_no_help() {
            assert_eq!(requested_help(["timer", "5m"]), None);
            assert_eq!(requested_help(["timer"]), None);
        }

        #[test]
        fn test_program_name_is_ignored() {
            assert_eq!(requested_help(["--help"]), None);
        }

        #[test]
        fn test_help_after_separator_is_ignored() {
            assert_eq!(requested_help(["timer", "--", "--help"]), None);
        }

        #[test]
        fn test_long_help_includes_long_about() {
            let long = Cli::command().render_long_help().to_string();
            let short = Cli::command().render_help().to_string();
            assert!(long.contains("時計形式"));
            assert!(!short.contains("時計形式"));
        }
    }

    // ------------------------------------------------------------------------
    // Validation Tests
    // ------------------------------------------------------------------------

    mod validation_tests {
        use super::*;

        #[test]
        fn test_validate_message_valid() {
            assert_eq!(validate_message("Tea is ready").unwrap(), "Tea is ready");
        }

        #[test]
        fn test_validate_message_japanese() {
            assert!(validate_message("お茶の時間").is_ok());
        }

        #[test]
        fn test_validate_message_empty() {
            let result = validate_message("");
            assert!(result.unwrap_err().contains("空"));
        }

        #[test]
        fn test_validate_message_too_long() {
            let result = validate_message(&"a".repeat(101));
            assert!(result.unwrap_err().contains("100"));
        }

        #[test]
        fn test_validate_message_exactly_100() {
            assert!(validate_message(&"a".repeat(100)).is_ok());
        }

        #[test]
        fn test_validate_message_whitespace_only() {
            assert!(validate_message("   ").unwrap_err().contains("空"));
        }

        #[test]
        fn test_validate_message_agrees_with_config() {
            let messages = [
                String::new(),
                "  ".to_string(),
                "Tea".to_string(),
                "あ".repeat(100),
                "あ".repeat(101),
            ];
            for message in &messages {
                let config = TimerConfig::default().with_message(Some(message.clone()));
                assert_eq!(
                    validate_message(message).is_ok(),
                    config.validate().is_ok(),
                    "disagreement on {:?}",
                    message
                );
            }
        }
    }

    // ------------------------------------------------------------------------
    // Error Case Tests (using try_parse)
    // ------------------------------------------------------------------------

    mod error_tests {
        use super::*;

        #[test]
        fn test_parse_unknown_flag() {
            let result = Cli::try_parse_from(["timer", "--bogus", "5m"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_empty_message() {
            let result = Cli::try_parse_from(["timer", "5m", "--message", ""]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_completions_invalid_shell() {
            let result = Cli::try_parse_from(["timer", "--completions", "invalid"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_help_is_reported_by_clap() {
            let err = Cli::try_parse_from(["timer", "--help"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        }
    }
}
