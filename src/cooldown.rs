//! Duration gates.
//!
//! Every timing decision in a level (shot cadence, bonus ship appearance,
//! the start-of-level input lock, the post-level delay) goes through a
//! [`Cooldown`]. Time is passed in explicitly as milliseconds from a
//! [`Clock`](crate::platform::Clock) so one frame sees one consistent `now`.

use rand::Rng;

use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cooldown {
    base: u64,
    variance: u64,
    /// Base plus the variance drawn at the last reset.
    duration: u64,
    started: Option<u64>,
}

impl Cooldown {
    /// Fixed-length cooldown of `milliseconds`.
    pub fn new(milliseconds: u64) -> Result<Self> {
        Self::with_variance(milliseconds, 0)
    }

    /// Cooldown whose length is `milliseconds` plus a value drawn uniformly
    /// from `0..=variance` on every reset.
    pub fn with_variance(milliseconds: u64, variance: u64) -> Result<Self> {
        if milliseconds == 0 {
            return Err(GameError::ZeroCooldown);
        }
        Ok(Self {
            base: milliseconds,
            variance,
            duration: milliseconds,
            started: None,
        })
    }

    /// Cooldown lasting `center ± spread`.
    pub fn symmetric(center: u64, spread: u64) -> Result<Self> {
        let spread = spread.min(center.saturating_sub(1));
        Self::with_variance(center - spread, spread * 2)
    }

    /// Restart the cooldown at `now`, redrawing the variance.
    pub fn reset<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) {
        self.started = Some(now);
        self.duration = if self.variance > 0 {
            self.base + rng.gen_range(0..=self.variance)
        } else {
            self.base
        };
    }

    /// True once at least the drawn duration has passed since the last
    /// reset. A cooldown that was never reset is finished.
    pub fn check_finished(&self, now: u64) -> bool {
        match self.started {
            None => true,
            Some(start) => now.saturating_sub(start) >= self.duration,
        }
    }

    /// Milliseconds left before the cooldown finishes.
    pub fn remaining(&self, now: u64) -> u64 {
        match self.started {
            None => 0,
            Some(start) => self.duration.saturating_sub(now.saturating_sub(start)),
        }
    }

    /// Length of the current cycle, variance included.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn variance(&self) -> u64 {
        self.variance
    }
}
