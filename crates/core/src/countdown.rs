//! Countdown shown on the Success step before onboarding completes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Result of a countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Ticks left before completion.
    Remaining(u32),
    /// The countdown reached zero; fire completion.
    Finished,
}

/// A bounded countdown, advanced one tick at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    /// Ticks before auto-advance.
    pub const TICKS: u32 = 8;

    /// Time between ticks.
    pub const INTERVAL: Duration = Duration::from_secs(3);

    /// A full countdown.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_ticks(Self::TICKS)
    }

    #[must_use]
    pub const fn with_ticks(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.remaining == 0
    }

    /// Advance by one tick. Ticking a finished countdown keeps reporting
    /// [`CountdownEvent::Finished`].
    pub const fn tick(&mut self) -> CountdownEvent {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownEvent::Finished
        } else {
            CountdownEvent::Remaining(self.remaining)
        }
    }

    /// Seconds left until completion.
    #[must_use]
    pub const fn seconds_left(self) -> u64 {
        self.remaining as u64 * Self::INTERVAL.as_secs()
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finishes_after_all_ticks() {
        let mut countdown = Countdown::new();
        for expected in (1..Countdown::TICKS).rev() {
            assert_eq!(countdown.tick(), CountdownEvent::Remaining(expected));
        }
        assert_eq!(countdown.tick(), CountdownEvent::Finished);
        assert!(countdown.is_finished());
        assert_eq!(countdown.tick(), CountdownEvent::Finished);
    }

    #[test]
    fn test_seconds_left() {
        assert_eq!(Countdown::new().seconds_left(), 24);
        assert_eq!(Countdown::with_ticks(0).seconds_left(), 0);
    }
}
