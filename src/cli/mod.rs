//! CLI module for the timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Argument definitions using clap derive
//! - `display`: Output formatting and progress rendering

pub mod commands;
pub mod display;

pub use commands::{requested_help, Cli, HelpRequest};
pub use display::{Display, ProgressMode, ProgressPrinter};
