//! Completion tone using rodio.
//!
//! Plays a short beep pattern on the default output device. Only compiled
//! with the `sound` feature.

use std::time::Duration;

use rodio::source::{SineWave, Source, Zero};
use rodio::{OutputStream, Sink};
use tracing::debug;

use super::error::AlertError;
use super::Alert;

const TONE_FREQUENCY_HZ: f32 = 880.0;
const TONE_VOLUME: f32 = 0.2;
const BEEP_LENGTH: Duration = Duration::from_millis(200);
const GAP_LENGTH: Duration = Duration::from_millis(120);
const GAP_SAMPLE_RATE: u32 = 48_000;

/// Default number of beeps.
pub const DEFAULT_BEEPS: u32 = 3;

/// Plays a beep pattern through the audio device.
#[derive(Debug, Clone, Copy)]
pub struct ToneAlert {
    beeps: u32,
}

impl ToneAlert {
    /// Creates a tone alert with the default pattern.
    #[must_use]
    pub fn new() -> Self {
        Self {
            beeps: DEFAULT_BEEPS,
        }
    }

    /// Sets the number of beeps.
    #[must_use]
    pub fn with_beeps(mut self, beeps: u32) -> Self {
        self.beeps = beeps;
        self
    }

    /// Returns the number of beeps.
    #[must_use]
    pub fn beeps(&self) -> u32 {
        self.beeps
    }
}

impl Default for ToneAlert {
    fn default() -> Self {
        Self::new()
    }
}

impl Alert for ToneAlert {
    fn name(&self) -> &'static str {
        "tone"
    }

    /// Blocks until the pattern has finished playing.
    fn fire(&self, _title: &str, _message: &str) -> Result<(), AlertError> {
        // The stream must stay alive until playback ends.
        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| AlertError::DeviceNotAvailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AlertError::PlaybackError(e.to_string()))?;

        debug!("Playing {} beeps", self.beeps);
        for _ in 0..self.beeps {
            sink.append(
                SineWave::new(TONE_FREQUENCY_HZ)
                    .take_duration(BEEP_LENGTH)
                    .amplify(TONE_VOLUME),
            );
            sink.append(Zero::<f32>::new(1, GAP_SAMPLE_RATE).take_duration(GAP_LENGTH));
        }
        sink.sleep_until_end();

        Ok(())
    }
}
