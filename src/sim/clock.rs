//! Simulation clock and run countdown

use serde::{Deserialize, Serialize};

/// Simulation time plus the whole-second countdown shown on the HUD.
///
/// `now` only advances while the loop is running, so every scheduled action
/// and cooldown is measured in simulated seconds rather than wall time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Seconds simulated since the run started
    now: f64,
    /// Whole seconds left on the countdown
    remaining: u32,
    /// Fractional second carried toward the next countdown decrement
    carry: f64,
    /// Expiry already reported
    expired: bool,
}

impl Clock {
    pub fn new(countdown_secs: u32) -> Self {
        Self {
            now: 0.0,
            remaining: countdown_secs,
            carry: 0.0,
            expired: false,
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Force the countdown to a value (HUD tests, debug)
    pub fn set_remaining(&mut self, secs: u32) {
        self.remaining = secs;
        self.carry = 0.0;
        self.expired = false;
    }

    /// Advance by `dt` seconds. Returns true on the frame the countdown hits
    /// zero, which is the first advance when it started at zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        let dt = f64::from(dt.max(0.0));
        self.now += dt;

        if self.expired {
            return false;
        }
        self.carry += dt;
        while self.carry >= 1.0 && self.remaining > 0 {
            self.carry -= 1.0;
            self.remaining -= 1;
        }
        self.expired = self.remaining == 0;
        self.expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_whole_seconds() {
        let mut clock = Clock::new(3);
        assert!(!clock.advance(0.5));
        assert_eq!(clock.remaining(), 3);
        assert!(!clock.advance(0.5));
        assert_eq!(clock.remaining(), 2);
        assert!((clock.now() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reports_expiry_once() {
        let mut clock = Clock::new(1);
        assert!(clock.advance(1.0));
        assert!(!clock.advance(1.0));
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_large_step_drains_several_seconds() {
        let mut clock = Clock::new(10);
        clock.advance(3.5);
        assert_eq!(clock.remaining(), 7);
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut clock = Clock::new(5);
        clock.advance(-2.0);
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.remaining(), 5);
    }

    #[test]
    fn test_zero_countdown_expires_on_first_advance() {
        let mut clock = Clock::new(0);
        assert!(clock.advance(0.0));
        assert!(!clock.advance(1.0));
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_set_remaining_rearms_expiry() {
        let mut clock = Clock::new(1);
        assert!(clock.advance(1.0));
        clock.set_remaining(1);
        assert!(!clock.advance(0.5));
        assert!(clock.advance(0.5));
    }
}
