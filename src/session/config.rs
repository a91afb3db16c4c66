//! Session configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timings and scoring parameters for a session.
///
/// Defaults mirror the classic pacing: a short face-down pause, a 2.5 s
/// memorization window, a one-second look at both picks, and a four-second
/// celebration before the session returns to idle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Face-down pause between round start and the preview reveal.
    pub preview_delay: Duration,

    /// How long all cards stay face up during the preview.
    pub preview_duration: Duration,

    /// Pause between the second pick and resolution.
    pub resolve_delay: Duration,

    /// Pause between round completion and the return to idle.
    pub round_over_delay: Duration,

    /// Points awarded per matched pair, before the combo multiplier.
    pub match_award: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_delay: Duration::from_secs(1),
            preview_duration: Duration::from_millis(2500),
            resolve_delay: Duration::from_secs(1),
            round_over_delay: Duration::from_secs(4),
            match_award: 5,
        }
    }
}

impl SessionConfig {
    /// Create a config with a custom match award.
    #[must_use]
    pub fn with_match_award(mut self, award: u32) -> Self {
        self.match_award = award;
        self
    }

    /// Create a config with a custom resolution delay.
    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay = delay;
        self
    }

    /// Create a config with custom preview timings.
    #[must_use]
    pub fn with_preview(mut self, delay: Duration, duration: Duration) -> Self {
        self.preview_delay = delay;
        self.preview_duration = duration;
        self
    }

    /// Create a config with a custom round-over delay.
    #[must_use]
    pub fn with_round_over_delay(mut self, delay: Duration) -> Self {
        self.round_over_delay = delay;
        self
    }
}
