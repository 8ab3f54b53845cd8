//! Countdown module for the timer.
//!
//! This module contains the core countdown functionality:
//! - `runner`: Countdown runner with state transitions and tick events

pub mod runner;

pub use runner::{Countdown, TimerEvent, TICK_INTERVAL};
