//! Simulation core of a fixed-screen arcade shooter.
//!
//! The crate is platform-agnostic: time, keyboard state and drawing come in
//! through the traits in [`platform`]. The `invaders` binary wires them to a
//! crossterm terminal.

pub mod bonus;
pub mod bullet;
pub mod campaign;
pub mod collision;
pub mod cooldown;
pub mod entities;
pub mod error;
pub mod formation;
pub mod level;
pub mod platform;
pub mod settings;
pub mod ship;
pub mod state;

pub use campaign::{Campaign, RunOutcome};
pub use error::{GameError, Result};
pub use level::{LevelController, ScreenCode};
pub use settings::{Difficulty, GameSettings, LevelConfig, SettingsTable};
pub use state::GameState;
