//! Per-player decision timers.
//!
//! Accounts for wall-clock time spent deciding, orthogonal to game rules.
//! The environment resumes the active player's timer before requesting a
//! decision and pauses it once the action is chosen.

use std::time::{Duration, Instant};

/// Decision-latency accounting for one player.
#[derive(Clone, Debug, Default)]
pub struct PlayerTimer {
    elapsed: Duration,
    started: Option<Instant>,
    actions: u32,
}

impl PlayerTimer {
    /// Create a fresh timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) measuring. No-op when already running.
    pub fn resume(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Stop measuring and accumulate the interval. No-op when not running.
    pub fn pause(&mut self) {
        if let Some(start) = self.started.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Count one decided action against this timer.
    pub fn increment_action(&mut self) {
        self.actions += 1;
    }

    /// Total accumulated decision time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(start) => self.elapsed + start.elapsed(),
            None => self.elapsed,
        }
    }

    /// Number of actions decided on this timer.
    #[must_use]
    pub fn action_count(&self) -> u32 {
        self.actions
    }

    /// Whether the timer is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Reset to zero, stopped.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_zero() {
        let timer = PlayerTimer::new();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.action_count(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_resume_pause_accumulates() {
        let mut timer = PlayerTimer::new();
        timer.resume();
        assert!(timer.is_running());
        timer.pause();
        assert!(!timer.is_running());

        let first = timer.elapsed();
        timer.resume();
        timer.pause();
        assert!(timer.elapsed() >= first);
    }

    #[test]
    fn test_pause_without_resume_is_noop() {
        let mut timer = PlayerTimer::new();
        timer.pause();
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_double_resume_is_noop() {
        let mut timer = PlayerTimer::new();
        timer.resume();
        timer.resume();
        timer.pause();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_action_count() {
        let mut timer = PlayerTimer::new();
        timer.increment_action();
        timer.increment_action();
        assert_eq!(timer.action_count(), 2);
    }

    #[test]
    fn test_reset() {
        let mut timer = PlayerTimer::new();
        timer.resume();
        timer.increment_action();
        timer.reset();

        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.action_count(), 0);
        assert!(!timer.is_running());
    }
}
