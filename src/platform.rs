//! Collaborator interfaces.
//!
//! The simulation never touches a terminal, a keyboard or the wall clock
//! directly. It asks a [`Clock`] for time, an [`InputSource`] for key
//! states and paints through a [`Surface`]. The binary plugs crossterm in
//! behind these traits; tests plug in scripted versions.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::entities::Sprite;
use crate::error::Result;

// ── Time ─────────────────────────────────────────────────────────────────────

pub trait Clock {
    /// Monotonic milliseconds.
    fn now(&self) -> u64;

    /// Block the caller for `ms` milliseconds.
    fn sleep(&self, ms: u64);
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Hand-driven clock; sleeping advances it instead of blocking.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }

    fn sleep(&self, ms: u64) {
        self.advance(ms);
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Keys the simulation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    Space,
    Left,
    Right,
    Slash,
    Escape,
    R,
    Q,
}

pub trait InputSource {
    /// Called once at the start of every frame.
    fn poll(&mut self) {}

    fn is_key_down(&self, key: Key) -> bool;
}

/// Movement and fire keys of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: Key,
    pub right: Key,
    pub shoot: Key,
}

impl KeyBindings {
    pub const PLAYER_ONE: KeyBindings = KeyBindings {
        left: Key::A,
        right: Key::D,
        shoot: Key::Space,
    };

    pub const PLAYER_TWO: KeyBindings = KeyBindings {
        left: Key::Left,
        right: Key::Right,
        shoot: Key::Slash,
    };

    /// Default bindings for the player at `index`.
    pub fn for_player(index: usize) -> Self {
        if index == 0 {
            Self::PLAYER_ONE
        } else {
            Self::PLAYER_TWO
        }
    }
}

pub const PAUSE_KEY: Key = Key::Escape;
pub const RESUME_KEY: Key = Key::R;
pub const QUIT_KEY: Key = Key::Q;

// ── Drawing ──────────────────────────────────────────────────────────────────

/// Frame-oriented drawing backend. Every frame is bracketed by
/// `init_drawing` and `complete_drawing`.
pub trait Surface {
    fn init_drawing(&mut self) -> Result<()>;

    fn draw_entity(&mut self, sprite: Sprite, x: i32, y: i32) -> Result<()>;

    fn draw_horizontal_line(&mut self, y: i32) -> Result<()>;

    fn draw_score(&mut self, player: usize, score: u32) -> Result<()>;

    fn draw_lives(&mut self, player: usize, lives: u32) -> Result<()>;

    fn draw_countdown(&mut self, level: u32, seconds: u64, bonus_life: bool) -> Result<()>;

    fn draw_pause_menu(&mut self) -> Result<()>;

    fn complete_drawing(&mut self) -> Result<()>;
}
