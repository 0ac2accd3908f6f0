//! The bonus ship that crosses the top of the screen now and then.

use log::info;
use rand::Rng;

use crate::cooldown::Cooldown;
use crate::entities::{EnemyShip, Entity};
use crate::error::Result;
use crate::settings::LevelConfig;

/// Horizontal pixels per frame.
const BONUS_SHIP_SPEED: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BonusShipState {
    Absent,
    Flying(EnemyShip),
    /// Hit; the explosion stays up until the explosion cooldown ends.
    Exploding(EnemyShip),
}

#[derive(Debug)]
pub struct BonusShip {
    state: BonusShipState,
    spawn_cooldown: Cooldown,
    explosion_cooldown: Cooldown,
}

impl BonusShip {
    /// No ship yet; the first one is due one spawn interval after `now`.
    pub fn new<R: Rng + ?Sized>(config: &LevelConfig, now: u64, rng: &mut R) -> Result<Self> {
        let mut spawn_cooldown =
            Cooldown::symmetric(config.bonus_ship_interval_ms, config.bonus_ship_variance_ms)?;
        spawn_cooldown.reset(now, rng);
        Ok(Self {
            state: BonusShipState::Absent,
            spawn_cooldown,
            explosion_cooldown: Cooldown::new(config.bonus_ship_explosion_ms)?,
        })
    }

    pub fn state(&self) -> &BonusShipState {
        &self.state
    }

    /// The ship while it can still be hit.
    pub fn flying(&self) -> Option<&EnemyShip> {
        match &self.state {
            BonusShipState::Flying(ship) => Some(ship),
            _ => None,
        }
    }

    /// The ship while it is on screen, flying or exploding.
    pub fn visible(&self) -> Option<&EnemyShip> {
        match &self.state {
            BonusShipState::Flying(ship) | BonusShipState::Exploding(ship) => Some(ship),
            BonusShipState::Absent => None,
        }
    }

    /// Advance one frame: fly, clear a finished explosion, spawn when due,
    /// and drop a ship that left the screen.
    pub fn update<R: Rng + ?Sized>(&mut self, screen_width: i32, now: u64, rng: &mut R) {
        let explosion_over = matches!(self.state, BonusShipState::Exploding(_))
            && self.explosion_cooldown.check_finished(now);
        if let BonusShipState::Flying(ship) = &mut self.state {
            ship.move_by(BONUS_SHIP_SPEED, 0);
        }
        if explosion_over {
            self.state = BonusShipState::Absent;
        }

        if self.state == BonusShipState::Absent && self.spawn_cooldown.check_finished(now) {
            self.state = BonusShipState::Flying(EnemyShip::special());
            self.spawn_cooldown.reset(now, rng);
            info!("A special ship appears");
        }

        if let BonusShipState::Flying(ship) = &self.state {
            if ship.x() > screen_width {
                self.state = BonusShipState::Absent;
                info!("The special ship has escaped");
            }
        }
    }

    /// Blow up the flying ship. Returns its point value, or `None` if there
    /// was nothing to hit.
    pub fn destroy<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) -> Option<u32> {
        let state = std::mem::replace(&mut self.state, BonusShipState::Absent);
        match state {
            BonusShipState::Flying(mut ship) => {
                ship.destroy();
                let points = ship.point_value();
                self.explosion_cooldown.reset(now, rng);
                self.state = BonusShipState::Exploding(ship);
                Some(points)
            }
            other => {
                self.state = other;
                None
            }
        }
    }
}
