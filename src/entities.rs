//! Entity types shared by every part of the simulation, mostly data.
//!
//! Coordinates are logical pixels with the origin in the top-left corner;
//! positions name the top-left corner of an entity's bounding box.

// ── Sprites ──────────────────────────────────────────────────────────────────

/// Visual identity tag handed to the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ship,
    ShipDestroyed,
    Bullet,
    EnemyBullet,
    EnemyShipA1,
    EnemyShipA2,
    EnemyShipB1,
    EnemyShipB2,
    EnemyShipC1,
    EnemyShipC2,
    EnemyShipSpecial,
    Explosion,
}

// ── Entity base ──────────────────────────────────────────────────────────────

/// Position and extent of anything that moves or collides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Body {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Integer centre, as used by the overlap test.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Anything with a body and a sprite.
pub trait Entity {
    fn body(&self) -> &Body;

    fn sprite(&self) -> Sprite;

    fn x(&self) -> i32 {
        self.body().x
    }

    fn y(&self) -> i32 {
        self.body().y
    }

    fn width(&self) -> i32 {
        self.body().width
    }

    fn height(&self) -> i32 {
        self.body().height
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: i32 = 12 * 2;
pub const ENEMY_HEIGHT: i32 = 8 * 2;
pub const SPECIAL_WIDTH: i32 = 16 * 2;
pub const SPECIAL_HEIGHT: i32 = 7 * 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyClass {
    A,
    B,
    C,
    Special,
}

impl EnemyClass {
    /// Score awarded for destroying one enemy of this class.
    pub fn point_value(self) -> u32 {
        match self {
            EnemyClass::A => 10,
            EnemyClass::B => 20,
            EnemyClass::C => 30,
            EnemyClass::Special => 100,
        }
    }

    fn sprites(self) -> (Sprite, Sprite) {
        match self {
            EnemyClass::A => (Sprite::EnemyShipA1, Sprite::EnemyShipA2),
            EnemyClass::B => (Sprite::EnemyShipB1, Sprite::EnemyShipB2),
            EnemyClass::C => (Sprite::EnemyShipC1, Sprite::EnemyShipC2),
            EnemyClass::Special => (Sprite::EnemyShipSpecial, Sprite::EnemyShipSpecial),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyShip {
    pub body: Body,
    pub class: EnemyClass,
    destroyed: bool,
    /// Second animation frame showing.
    alternate: bool,
}

impl EnemyShip {
    /// A grid enemy at the given position.
    pub fn new(x: i32, y: i32, class: EnemyClass) -> Self {
        Self {
            body: Body::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            class,
            destroyed: false,
            alternate: false,
        }
    }

    /// The bonus ship, entering from beyond the left edge.
    pub fn special() -> Self {
        Self {
            body: Body::new(-SPECIAL_WIDTH, 60, SPECIAL_WIDTH, SPECIAL_HEIGHT),
            class: EnemyClass::Special,
            destroyed: false,
            alternate: false,
        }
    }

    pub fn point_value(&self) -> u32 {
        self.class.point_value()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.body.move_by(dx, dy);
    }

    /// Flip to the other animation frame.
    pub fn animate(&mut self) {
        self.alternate = !self.alternate;
    }
}

impl Entity for EnemyShip {
    fn body(&self) -> &Body {
        &self.body
    }

    fn sprite(&self) -> Sprite {
        if self.destroyed {
            return Sprite::Explosion;
        }
        let (first, second) = self.class.sprites();
        if self.alternate {
            second
        } else {
            first
        }
    }
}
