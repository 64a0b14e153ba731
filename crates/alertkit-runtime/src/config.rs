#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! [`ControllerConfig`] decides how a new dialog waits for the previous one to
//! leave the screen and how long timed messages stay up. Defaults suit hosts
//! that cannot report when a dismissal has finished animating.
//!
//! Environment overrides (read by [`ControllerConfig::from_env`]):
//!
//! | Variable | Effect |
//! |---|---|
//! | `ALERTKIT_PRESENT_DELAY_MS` | force [`PresentPacing::FixedDelay`] with this many milliseconds |
//! | `ALERTKIT_MESSAGE_DURATION_MS` | default lifetime of timed messages |
//!
//! Malformed values are ignored.

use std::env;
use std::time::Duration;

use alertkit_core::DEFAULT_MESSAGE_DURATION;

/// Delay before attaching a dialog when the host gives no dismiss signal.
///
/// Long enough for a typical closing animation to finish so a present never
/// overlaps the previous dismiss.
pub const PRESENT_DELAY: Duration = Duration::from_millis(300);

const PRESENT_DELAY_VAR: &str = "ALERTKIT_PRESENT_DELAY_MS";
const MESSAGE_DURATION_VAR: &str = "ALERTKIT_MESSAGE_DURATION_MS";

/// How a present waits for the previous dialog's dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentPacing {
    /// `AwaitDismissal` if the host signals dismiss completion, otherwise
    /// `FixedDelay(PRESENT_DELAY)`.
    #[default]
    Auto,
    /// Always wait this long before attaching.
    FixedDelay(Duration),
    /// Attach once every outstanding detach has completed.
    AwaitDismissal,
}

impl PresentPacing {
    /// Resolve [`Auto`](Self::Auto) against the host's capability.
    #[must_use]
    pub fn resolve(self, host_signals_dismissal: bool) -> Self {
        match self {
            Self::Auto if host_signals_dismissal => Self::AwaitDismissal,
            Self::Auto => Self::FixedDelay(PRESENT_DELAY),
            other => other,
        }
    }
}

/// Dialog controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Present sequencing policy.
    pub pacing: PresentPacing,
    /// Lifetime of timed messages created without an explicit duration.
    pub timed_message_duration: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            pacing: PresentPacing::Auto,
            timed_message_duration: DEFAULT_MESSAGE_DURATION,
        }
    }
}

impl ControllerConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let delay = env::var(PRESENT_DELAY_VAR).ok();
        let duration = env::var(MESSAGE_DURATION_VAR).ok();
        Self::from_env_values(delay.as_deref(), duration.as_deref())
    }

    /// Apply override values as they would be read from the environment.
    #[must_use]
    pub fn from_env_values(present_delay_ms: Option<&str>, message_duration_ms: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(ms) = present_delay_ms.and_then(parse_millis) {
            config.pacing = PresentPacing::FixedDelay(ms);
        }
        if let Some(ms) = message_duration_ms.and_then(parse_millis) {
            config.timed_message_duration = ms;
        }
        config
    }

    /// Set the pacing policy.
    #[must_use]
    pub fn pacing(mut self, pacing: PresentPacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the default timed message lifetime.
    #[must_use]
    pub fn timed_message_duration(mut self, duration: Duration) -> Self {
        self.timed_message_duration = duration;
        self
    }
}

fn parse_millis(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}
