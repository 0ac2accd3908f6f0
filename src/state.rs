//! Per-player progress carried from one level to the next.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of one player's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    level: u32,
    score: u32,
    lives_remaining: u32,
    bullets_shot: u32,
    ships_destroyed: u32,
}

impl GameState {
    pub fn new(
        level: u32,
        score: u32,
        lives_remaining: u32,
        bullets_shot: u32,
        ships_destroyed: u32,
    ) -> Self {
        Self {
            level,
            score,
            lives_remaining,
            bullets_shot,
            ships_destroyed,
        }
    }

    /// Fresh run: level 1, nothing scored.
    pub fn first_level(lives: u32) -> Self {
        Self::new(1, 0, lives, 0, 0)
    }

    /// The same progress, one level further.
    pub fn next_level(&self) -> Self {
        Self {
            level: self.level + 1,
            ..*self
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    pub fn bullets_shot(&self) -> u32 {
        self.bullets_shot
    }

    pub fn ships_destroyed(&self) -> u32 {
        self.ships_destroyed
    }

    pub fn is_alive(&self) -> bool {
        self.lives_remaining > 0
    }
}
