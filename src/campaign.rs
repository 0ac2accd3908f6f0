//! A run of consecutive levels at one difficulty tier.

use log::info;
use rand::Rng;

use crate::error::{GameError, Result};
use crate::level::{LevelController, ScreenCode};
use crate::platform::{Clock, InputSource, Surface};
use crate::settings::{Difficulty, LevelConfig, SettingsTable, NUM_LEVELS};
use crate::state::GameState;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Final counters of every player.
    pub states: Vec<GameState>,
    /// `Score` when the run was played out, `Exit` when the user quit.
    pub code: ScreenCode,
}

#[derive(Debug, Clone)]
pub struct Campaign {
    table: SettingsTable,
    difficulty: Difficulty,
    config: LevelConfig,
}

impl Campaign {
    pub fn new(table: SettingsTable, difficulty: Difficulty, config: LevelConfig) -> Result<Self> {
        table.validate()?;
        config.validate()?;
        if config.num_levels == 0 || config.num_levels > NUM_LEVELS {
            return Err(GameError::InvalidSettings(format!(
                "a run needs between 1 and {} levels, got {}",
                NUM_LEVELS, config.num_levels
            )));
        }
        Ok(Self {
            table,
            difficulty,
            config,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Starting counters for `players` players.
    pub fn initial_states(&self, players: usize) -> Result<Vec<GameState>> {
        if players == 0 || players > 2 {
            return Err(GameError::PlayerCount(players));
        }
        Ok(vec![GameState::first_level(self.config.max_lives); players])
    }

    /// Whether the level `state` is about to play grants an extra life.
    pub fn bonus_life(&self, state: &GameState) -> bool {
        state.level() % self.config.extra_life_frequency == 0
            && state.lives_remaining() < self.config.max_lives
    }

    /// Build the controller for the level all `states` are on.
    pub fn start_level<R: Rng + ?Sized>(
        &self,
        states: &[GameState],
        now: u64,
        rng: &mut R,
    ) -> Result<LevelController> {
        let first = states.first().ok_or(GameError::PlayerCount(0))?;
        let settings = self.table.get(self.difficulty, first.level())?;
        let bonus_life = states.iter().any(|state| self.bonus_life(state));
        LevelController::new(&self.config, &settings, states, bonus_life, now, rng)
    }

    /// Carry every player over to the next level.
    pub fn advance(&self, states: &[GameState]) -> Vec<GameState> {
        states.iter().map(GameState::next_level).collect()
    }

    /// True once no player has lives left or the last level is behind us.
    pub fn is_over(&self, states: &[GameState]) -> bool {
        !states.iter().any(GameState::is_alive)
            || states
                .first()
                .map_or(true, |state| state.level() > self.config.num_levels)
    }

    /// Play levels until the run is over or the user quits.
    pub fn play<C, I, S, R>(
        &self,
        players: usize,
        clock: &C,
        input: &mut I,
        surface: &mut S,
        rng: &mut R,
    ) -> Result<RunOutcome>
    where
        C: Clock + ?Sized,
        I: InputSource + ?Sized,
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let mut states = self.initial_states(players)?;
        info!("Starting a {} run for {} player(s)", self.difficulty, players);

        loop {
            let mut level = self.start_level(&states, clock.now(), rng)?;
            let code = level.run(clock, input, surface, rng)?;
            states = level.game_states();

            match code {
                ScreenCode::Game => states = self.advance(&states),
                ScreenCode::Exit => {
                    info!("Run abandoned on level {}", level.level());
                    return Ok(RunOutcome { states, code });
                }
                _ => {
                    info!("Run over on level {}", level.level());
                    return Ok(RunOutcome {
                        states,
                        code: ScreenCode::Score,
                    });
                }
            }
        }
    }
}
