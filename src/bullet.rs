//! Projectiles and their reuse pool.
//!
//! A [`Bullet`] is never cloned. It lives either in the active set of a
//! [`Bullets`] value or in its [`BulletPool`] free list, and moving it into
//! the pool consumes it. The active set therefore cannot keep a reference to
//! a recycled bullet, and the same instance cannot be recycled twice.

use std::collections::HashSet;

use log::warn;

use crate::entities::{Body, Entity, Sprite};

pub const BULLET_WIDTH: i32 = 3 * 2;
pub const BULLET_HEIGHT: i32 = 5 * 2;

/// Stable identity of a pooled bullet instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletOwner {
    /// Fired by the ship of the player at this index.
    Player(usize),
    Enemy,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Bullet {
    id: BulletId,
    pub body: Body,
    /// Pixels per frame; negative travels up, positive travels down.
    pub speed: i32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn id(&self) -> BulletId {
        self.id
    }

    /// Apply one frame of movement.
    pub fn update(&mut self) {
        self.body.y += self.speed;
    }

    pub fn is_player_fired(&self) -> bool {
        self.speed < 0
    }

    fn place(&mut self, x: i32, y: i32, speed: i32, owner: BulletOwner) {
        self.body.x = x - self.body.width / 2;
        self.body.y = y;
        self.speed = speed;
        self.owner = owner;
    }
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        if self.speed < 0 {
            Sprite::Bullet
        } else {
            Sprite::EnemyBullet
        }
    }
}

// ── Pool ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct BulletPool {
    free: Vec<Bullet>,
    next_id: u32,
}

impl BulletPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a bullet centred on `x`, reusing a recycled one when
    /// available.
    pub fn acquire(&mut self, x: i32, y: i32, speed: i32, owner: BulletOwner) -> Bullet {
        let mut bullet = match self.free.pop() {
            Some(bullet) => bullet,
            None => {
                let id = BulletId(self.next_id);
                self.next_id += 1;
                Bullet {
                    id,
                    body: Body::new(0, 0, BULLET_WIDTH, BULLET_HEIGHT),
                    speed: 0,
                    owner,
                }
            }
        };
        bullet.place(x, y, speed, owner);
        bullet
    }

    /// Return a batch of bullets to the free list. An id that is already
    /// free is dropped instead of entering the list twice.
    pub fn recycle<I: IntoIterator<Item = Bullet>>(&mut self, bullets: I) {
        for bullet in bullets {
            if self.free.iter().any(|b| b.id == bullet.id) {
                warn!("Bullet {:?} recycled while already free", bullet.id);
                continue;
            }
            self.free.push(bullet);
        }
    }

    /// Number of bullets waiting to be reused.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Number of distinct bullets ever constructed by this pool.
    pub fn created(&self) -> u32 {
        self.next_id
    }

    pub fn free_ids(&self) -> impl Iterator<Item = BulletId> + '_ {
        self.free.iter().map(|b| b.id)
    }
}

// ── Active set ───────────────────────────────────────────────────────────────

/// The bullets currently on screen, together with the pool that feeds them.
#[derive(Debug, Default)]
pub struct Bullets {
    active: Vec<Bullet>,
    pool: BulletPool,
}

impl Bullets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a new bullet in flight and return its id.
    pub fn fire(&mut self, x: i32, y: i32, speed: i32, owner: BulletOwner) -> BulletId {
        let bullet = self.pool.acquire(x, y, speed, owner);
        let id = bullet.id();
        self.active.push(bullet);
        id
    }

    /// Move every active bullet by its speed.
    pub fn advance(&mut self) {
        for bullet in &mut self.active {
            bullet.update();
        }
    }

    /// Remove every active bullet matching `pred` and recycle it in the same
    /// step. Returns how many were recycled.
    pub fn recycle_where<F: FnMut(&Bullet) -> bool>(&mut self, mut pred: F) -> usize {
        let mut count = 0;
        let mut index = 0;
        while index < self.active.len() {
            if pred(&self.active[index]) {
                let bullet = self.active.swap_remove(index);
                self.pool.recycle(std::iter::once(bullet));
                count += 1;
            } else {
                index += 1;
            }
        }
        count
    }

    /// Recycle the bullets whose ids are in `ids`.
    pub fn recycle_ids(&mut self, ids: &HashSet<BulletId>) -> usize {
        if ids.is_empty() {
            return 0;
        }
        self.recycle_where(|b| ids.contains(&b.id()))
    }

    pub fn count_owned_by(&self, owner: BulletOwner) -> usize {
        self.active.iter().filter(|b| b.owner == owner).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.active.iter()
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet> {
        self.active.iter().find(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn pool(&self) -> &BulletPool {
        &self.pool
    }
}
