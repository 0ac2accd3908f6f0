//! Error types for the simulation core.
//!
//! Gameplay outcomes (no enemies left, no lives left, bullets leaving the
//! screen) are state transitions, not errors. What lands here are broken
//! configuration and backend failures.

use crate::settings::Difficulty;

/// Error type for level construction, settings lookup and rendering
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// A cooldown with a zero duration would never gate anything
    #[error("cooldown duration must be greater than zero")]
    ZeroCooldown,

    /// No settings exist for the requested level
    #[error("level {level} is out of range for the {tier} tier (1..={levels})")]
    LevelOutOfRange {
        tier: Difficulty,
        level: u32,
        levels: u32,
    },

    /// A level is played by one or two players
    #[error("a level needs one or two players, got {0}")]
    PlayerCount(usize),

    /// A settings table or level config that fails validation
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// IO error from the drawing surface or settings file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed settings JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, GameError>;
