//! Countdown runner.
//!
//! This module provides the core countdown functionality:
//! - State transitions (Pending → Running → Completed / Cancelled)
//! - Countdown with tokio::time::interval
//! - Event firing for progress display
//! - Immediate cancellation from an external future

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::TimerError;
use crate::types::{TimerDuration, TimerSession};

/// Period between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// TimerEvent
// ============================================================================

/// Progress events published while a countdown runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started
    Started {
        /// Full duration
        total: TimerDuration,
    },
    /// One second elapsed
    Tick {
        /// Time left
        remaining: TimerDuration,
    },
    /// Countdown reached zero
    Completed,
    /// Countdown interrupted
    Cancelled {
        /// Time left when the interrupt arrived
        remaining: TimerDuration,
    },
}

// ============================================================================
// Countdown
// ============================================================================

/// Runs a single countdown and reports progress over a channel.
pub struct Countdown {
    /// Session being counted down
    session: TimerSession,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl Countdown {
    /// Creates a countdown for `duration` that reports to `event_tx`.
    pub fn new(duration: TimerDuration, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            session: TimerSession::new(duration),
            event_tx,
        }
    }

    /// Returns a reference to the session.
    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    /// Runs the countdown until it completes or `cancel` resolves.
    ///
    /// Remaining time is derived from the monotonic clock, so a late tick
    /// never stretches the countdown. A zero duration completes without
    /// ticking. The sender is dropped on return, which ends the event stream.
    ///
    /// # Errors
    ///
    /// - `TimerError::Interrupted` if `cancel` resolves first
    /// - `TimerError::EventChannelClosed` if the event receiver was dropped
    pub async fn run<F>(mut self, cancel: F) -> Result<TimerSession, TimerError>
    where
        F: Future<Output = ()>,
    {
        self.session.start()?;
        let total = self.session.duration();
        self.emit(TimerEvent::Started { total })?;
        info!("Countdown started: {} seconds", total.as_secs());

        if total.is_zero() {
            return self.finish();
        }

        let started = Instant::now();
        let mut ticker = interval_at(started + TICK_INTERVAL, TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(cancel);

        loop {
            tokio::select! {
                biased;

                () = &mut cancel => {
                    self.session.cancel()?;
                    let remaining = self.session.remaining();
                    self.emit(TimerEvent::Cancelled { remaining })?;
                    info!("Countdown cancelled with {} seconds left", remaining.as_secs());
                    return Err(TimerError::Interrupted { remaining });
                }
                _ = ticker.tick() => {
                    let elapsed = TimerDuration::from_secs(started.elapsed().as_secs());
                    let done = self.session.advance_to(elapsed)?;
                    let remaining = self.session.remaining();
                    debug!("Tick: {} seconds left", remaining.as_secs());
                    self.emit(TimerEvent::Tick { remaining })?;

                    if done {
                        return self.finish();
                    }
                }
            }
        }
    }

    fn finish(mut self) -> Result<TimerSession, TimerError> {
        self.session.complete()?;
        self.emit(TimerEvent::Completed)?;
        info!("Countdown completed");
        Ok(self.session)
    }

    fn emit(&self, event: TimerEvent) -> Result<(), TimerError> {
        self.event_tx
            .send(event)
            .map_err(|_| TimerError::EventChannelClosed)
    }
}

// ============================================================================
// Tests
// ============================================================================
