#![allow(dead_code)]

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use invaders::entities::Sprite;
use invaders::platform::{InputSource, Key, Surface};
use invaders::{GameSettings, GameState, LevelConfig, LevelController, Result};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// One enemy, slow movement, a shot every 2000 ± 400 ms.
pub fn single_enemy() -> GameSettings {
    GameSettings::new(1, 1, 60, 2000)
}

pub fn level_with(states: &[GameState], settings: &GameSettings, rng: &mut StdRng) -> LevelController {
    LevelController::new(&LevelConfig::default(), settings, states, false, 0, rng).unwrap()
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Keys held down by the test, plus an optional quit after a number of polls.
#[derive(Default)]
pub struct ScriptedInput {
    pub down: HashSet<Key>,
    pub polls: u64,
    pub quit_after: Option<u64>,
}

impl ScriptedInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn holding(keys: &[Key]) -> Self {
        Self {
            down: keys.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn quitting_after(polls: u64) -> Self {
        Self {
            quit_after: Some(polls),
            ..Self::default()
        }
    }

    pub fn press(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) {
        self.polls += 1;
        if self.quit_after.is_some_and(|n| self.polls >= n) {
            self.down.insert(Key::Q);
        }
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Records the calls of the most recent frame.
#[derive(Default)]
pub struct RecordingSurface {
    pub frames: usize,
    pub completed: usize,
    pub entities: Vec<(Sprite, i32, i32)>,
    pub lines: Vec<i32>,
    pub scores: Vec<(usize, u32)>,
    pub lives: Vec<(usize, u32)>,
    pub countdowns: Vec<(u32, u64, bool)>,
    pub pause_menus: usize,
}

impl RecordingSurface {
    pub fn count(&self, sprite: Sprite) -> usize {
        self.entities.iter().filter(|(s, _, _)| *s == sprite).count()
    }
}

impl Surface for RecordingSurface {
    fn init_drawing(&mut self) -> Result<()> {
        self.frames += 1;
        self.entities.clear();
        self.lines.clear();
        self.scores.clear();
        self.lives.clear();
        self.countdowns.clear();
        self.pause_menus = 0;
        Ok(())
    }

    fn draw_entity(&mut self, sprite: Sprite, x: i32, y: i32) -> Result<()> {
        self.entities.push((sprite, x, y));
        Ok(())
    }

    fn draw_horizontal_line(&mut self, y: i32) -> Result<()> {
        self.lines.push(y);
        Ok(())
    }

    fn draw_score(&mut self, player: usize, score: u32) -> Result<()> {
        self.scores.push((player, score));
        Ok(())
    }

    fn draw_lives(&mut self, player: usize, lives: u32) -> Result<()> {
        self.lives.push((player, lives));
        Ok(())
    }

    fn draw_countdown(&mut self, level: u32, seconds: u64, bonus_life: bool) -> Result<()> {
        self.countdowns.push((level, seconds, bonus_life));
        Ok(())
    }

    fn draw_pause_menu(&mut self) -> Result<()> {
        self.pause_menus += 1;
        Ok(())
    }

    fn complete_drawing(&mut self) -> Result<()> {
        self.completed += 1;
        Ok(())
    }
}
