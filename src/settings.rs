//! Level tuning.
//!
//! [`GameSettings`] tune one level, [`SettingsTable`] holds the seven levels
//! of each difficulty tier, and [`LevelConfig`] carries the playfield
//! geometry and the fixed timings every level shares. All three are plain
//! serde values so a table can be loaded from JSON instead of the built-in
//! one.

use std::fmt;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Share of the shooting frequency used as ± variance.
const SHOOTING_VARIANCE: f64 = 0.2;

// ── Difficulty ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "normal" | "medium" | "2" => Some(Difficulty::Normal),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Per-level settings ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Columns in the enemy formation.
    pub formation_width: u32,
    /// Rows in the enemy formation.
    pub formation_height: u32,
    /// Base of the formation's step cadence, in frames.
    pub base_speed: u32,
    /// Average time between formation shots.
    pub shooting_frequency_ms: u64,
}

impl GameSettings {
    pub const fn new(
        formation_width: u32,
        formation_height: u32,
        base_speed: u32,
        shooting_frequency_ms: u64,
    ) -> Self {
        Self {
            formation_width,
            formation_height,
            base_speed,
            shooting_frequency_ms,
        }
    }

    pub fn base_shoot_frequency_ms(&self) -> u64 {
        self.shooting_frequency_ms
    }

    /// Spread around [`base_shoot_frequency_ms`](Self::base_shoot_frequency_ms).
    pub fn shoot_frequency_variance_ms(&self) -> u64 {
        (self.shooting_frequency_ms as f64 * SHOOTING_VARIANCE) as u64
    }

    fn validate(&self) -> Result<()> {
        if self.formation_width == 0 || self.formation_height == 0 {
            return Err(GameError::InvalidSettings(format!(
                "formation must have at least one row and column, got {}x{}",
                self.formation_width, self.formation_height
            )));
        }
        if self.shooting_frequency_ms == 0 {
            return Err(GameError::InvalidSettings(
                "shooting frequency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Difficulty tables ────────────────────────────────────────────────────────

pub const NUM_LEVELS: u32 = 7;

const EASY: [GameSettings; NUM_LEVELS as usize] = [
    GameSettings::new(5, 4, 60, 2000),
    GameSettings::new(5, 5, 50, 2500),
    GameSettings::new(6, 5, 40, 1500),
    GameSettings::new(6, 6, 30, 1500),
    GameSettings::new(7, 6, 20, 1000),
    GameSettings::new(7, 7, 10, 1000),
    GameSettings::new(8, 7, 2, 500),
];

const NORMAL: [GameSettings; NUM_LEVELS as usize] = [
    GameSettings::new(6, 4, 60, 2000),
    GameSettings::new(6, 5, 50, 2500),
    GameSettings::new(7, 5, 40, 1500),
    GameSettings::new(7, 7, 30, 1500),
    GameSettings::new(7, 7, 20, 1000),
    GameSettings::new(7, 8, 10, 1000),
    GameSettings::new(8, 8, 2, 500),
];

const HARD: [GameSettings; NUM_LEVELS as usize] = [
    GameSettings::new(6, 5, 60, 1800),
    GameSettings::new(6, 5, 50, 1500),
    GameSettings::new(7, 6, 40, 1500),
    GameSettings::new(7, 7, 30, 1500),
    GameSettings::new(7, 8, 20, 1000),
    GameSettings::new(8, 8, 10, 500),
    GameSettings::new(9, 8, 2, 500),
];

/// Settings for every level of every tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsTable {
    pub easy: Vec<GameSettings>,
    pub normal: Vec<GameSettings>,
    pub hard: Vec<GameSettings>,
}

impl Default for SettingsTable {
    fn default() -> Self {
        Self {
            easy: EASY.to_vec(),
            normal: NORMAL.to_vec(),
            hard: HARD.to_vec(),
        }
    }
}

impl SettingsTable {
    /// Parse and validate a table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: SettingsTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        info!("Loaded settings table from {}", path.display());
        Ok(table)
    }

    pub fn tier(&self, difficulty: Difficulty) -> &[GameSettings] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Settings for `level` (1-based) of the given tier.
    pub fn get(&self, difficulty: Difficulty, level: u32) -> Result<GameSettings> {
        let tier = self.tier(difficulty);
        level
            .checked_sub(1)
            .and_then(|index| tier.get(index as usize))
            .copied()
            .ok_or(GameError::LevelOutOfRange {
                tier: difficulty,
                level,
                levels: tier.len() as u32,
            })
    }

    /// Every tier must list exactly [`NUM_LEVELS`] valid levels.
    pub fn validate(&self) -> Result<()> {
        for difficulty in Difficulty::ALL {
            let tier = self.tier(difficulty);
            if tier.len() != NUM_LEVELS as usize {
                return Err(GameError::InvalidSettings(format!(
                    "{} tier has {} levels, expected {}",
                    difficulty,
                    tier.len(),
                    NUM_LEVELS
                )));
            }
            for settings in tier {
                settings.validate()?;
            }
        }
        Ok(())
    }
}

// ── Shared level configuration ───────────────────────────────────────────────

/// Geometry and timings shared by every level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Playfield width in logical pixels.
    pub width: i32,
    /// Playfield height in logical pixels.
    pub height: i32,
    pub fps: u32,
    /// Height of the line separating the HUD from the playfield.
    pub separation_line_height: i32,
    /// Input lock at the start of a level.
    pub input_delay_ms: u64,
    /// Bonus score for each spare life when a level ends.
    pub life_score: u32,
    pub bonus_ship_interval_ms: u64,
    pub bonus_ship_variance_ms: u64,
    /// How long the bonus ship explosion stays on screen.
    pub bonus_ship_explosion_ms: u64,
    /// Delay between the level being decided and the level ending.
    pub screen_change_interval_ms: u64,
    pub max_lives: u32,
    /// An extra life is offered on every level that is a multiple of this.
    pub extra_life_frequency: u32,
    pub num_levels: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 448,
            height: 520,
            fps: 60,
            separation_line_height: 40,
            input_delay_ms: 6000,
            life_score: 100,
            bonus_ship_interval_ms: 20000,
            bonus_ship_variance_ms: 10000,
            bonus_ship_explosion_ms: 500,
            screen_change_interval_ms: 1500,
            max_lives: 3,
            extra_life_frequency: 3,
            num_levels: NUM_LEVELS,
        }
    }
}

impl LevelConfig {
    /// Milliseconds per frame at the configured frame rate.
    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidSettings(format!(
                "playfield must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(GameError::InvalidSettings("fps must be greater than zero".to_string()));
        }
        if self.separation_line_height >= self.height {
            return Err(GameError::InvalidSettings(
                "separation line lies below the playfield".to_string(),
            ));
        }
        if self.extra_life_frequency == 0 {
            return Err(GameError::InvalidSettings(
                "extra life frequency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
