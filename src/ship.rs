//! The player's ship.

use log::debug;
use rand::Rng;

use crate::bullet::{BulletOwner, Bullets};
use crate::cooldown::Cooldown;
use crate::entities::{Body, Entity, Sprite};
use crate::error::Result;

pub const SHIP_WIDTH: i32 = 13 * 2;
pub const SHIP_HEIGHT: i32 = 8 * 2;
/// Pixels per movement call.
pub const SHIP_SPEED: i32 = 2;
pub const SHOOTING_INTERVAL_MS: u64 = 750;
pub const BULLET_SPEED: i32 = -6;
/// Time a hit ship stays out of action.
pub const DESTRUCTION_COOLDOWN_MS: u64 = 1000;
/// Own bullets allowed on screen at once.
pub const MAX_BULLETS_IN_FLIGHT: usize = 3;

#[derive(Debug)]
pub struct Ship {
    pub body: Body,
    /// Index of the controlling player.
    player: usize,
    speed: i32,
    sprite: Sprite,
    destroyed: bool,
    shooting_cooldown: Cooldown,
    destruction_cooldown: Cooldown,
}

impl Ship {
    pub fn new(x: i32, y: i32, player: usize) -> Result<Self> {
        Ok(Self {
            body: Body::new(x, y, SHIP_WIDTH, SHIP_HEIGHT),
            player,
            speed: SHIP_SPEED,
            sprite: Sprite::Ship,
            destroyed: false,
            shooting_cooldown: Cooldown::new(SHOOTING_INTERVAL_MS)?,
            destruction_cooldown: Cooldown::new(DESTRUCTION_COOLDOWN_MS)?,
        })
    }

    pub fn player(&self) -> usize {
        self.player
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Boundary checks are the caller's job.
    pub fn move_right(&mut self) {
        self.body.move_by(self.speed, 0);
    }

    pub fn move_left(&mut self) {
        self.body.move_by(-self.speed, 0);
    }

    /// Fire a bullet upward from the ship's nose. Refused while destroyed,
    /// while the shooting cooldown runs, or with too many own bullets in
    /// flight.
    pub fn shoot<R: Rng + ?Sized>(&mut self, bullets: &mut Bullets, now: u64, rng: &mut R) -> bool {
        let owner = BulletOwner::Player(self.player);
        if self.destroyed
            || !self.shooting_cooldown.check_finished(now)
            || bullets.count_owned_by(owner) >= MAX_BULLETS_IN_FLIGHT
        {
            return false;
        }
        self.shooting_cooldown.reset(now, rng);
        let id = bullets.fire(
            self.body.x + self.body.width / 2,
            self.body.y,
            BULLET_SPEED,
            owner,
        );
        debug!("Player {} fired bullet {:?}", self.player + 1, id);
        true
    }

    /// Recover from a hit once the destruction cooldown is over.
    pub fn update(&mut self, now: u64) {
        if self.destroyed && self.destruction_cooldown.check_finished(now) {
            self.destroyed = false;
        }
        self.sprite = if self.destroyed {
            Sprite::ShipDestroyed
        } else {
            Sprite::Ship
        };
    }

    pub fn destroy<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) {
        self.destroyed = true;
        self.sprite = Sprite::ShipDestroyed;
        self.destruction_cooldown.reset(now, rng);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        self.sprite
    }
}
