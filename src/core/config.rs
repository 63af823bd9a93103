//! Per-run bot configuration
//!
//! A [`RunConfig`] is supplied once when the control loop starts and stays
//! immutable for the lifetime of that run. Changing any of these settings
//! means stopping the bot and starting a new run.

use std::time::Duration;

/// Lower bound for the polling delay accepted at the configuration surface.
pub const MIN_POLL_DELAY: Duration = Duration::from_secs(1);

/// Upper bound for the polling delay accepted at the configuration surface.
pub const MAX_POLL_DELAY: Duration = Duration::from_secs(10);

/// Default engine search budget per move.
pub const DEFAULT_MOVE_TIME: Duration = Duration::from_millis(100);

/// Immutable configuration for a single bot run.
///
/// # Fields
///
/// - `play_white`: which side the bot plays (and therefore which side-to-move
///   counts as a decision point)
/// - `poll_delay`: sleep between polling ticks
/// - `auto_play`: when false, decided moves are surfaced as advisory events
///   but never clicked
/// - `move_time`: fixed engine search budget per decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub play_white: bool,
    pub poll_delay: Duration,
    pub auto_play: bool,
    pub move_time: Duration,
}

impl RunConfig {
    /// Build a configuration, clamping the polling delay into the accepted
    /// 1-10 second range.
    pub fn new(play_white: bool, poll_delay: Duration, auto_play: bool) -> Self {
        Self {
            play_white,
            poll_delay: poll_delay.clamp(MIN_POLL_DELAY, MAX_POLL_DELAY),
            auto_play,
            move_time: DEFAULT_MOVE_TIME,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(true, MIN_POLL_DELAY, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_delay_clamped_low() {
        let config = RunConfig::new(true, Duration::from_millis(50), true);
        assert_eq!(config.poll_delay, MIN_POLL_DELAY);
    }

    #[test]
    fn test_poll_delay_clamped_high() {
        let config = RunConfig::new(false, Duration::from_secs(60), false);
        assert_eq!(config.poll_delay, MAX_POLL_DELAY);
    }

    #[test]
    fn test_poll_delay_in_range_kept() {
        let config = RunConfig::new(true, Duration::from_secs(3), true);
        assert_eq!(config.poll_delay, Duration::from_secs(3));
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(config.play_white);
        assert!(config.auto_play);
        assert_eq!(config.poll_delay, MIN_POLL_DELAY);
        assert_eq!(config.move_time, DEFAULT_MOVE_TIME);
    }
}
