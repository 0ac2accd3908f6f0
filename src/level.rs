//! One level of play.
//!
//! [`LevelController`] owns everything on screen for the duration of a
//! level and advances it one frame per [`update`](LevelController::update):
//! input, then movement, then bullets, then collisions and cleanup. Drawing
//! is a separate read-only pass. Counters come in as [`GameState`]s and go
//! out the same way.

use log::info;
use rand::Rng;

use crate::bonus::BonusShip;
use crate::bullet::Bullets;
use crate::collision::{clean_bullets, manage_collisions, CollisionReport};
use crate::cooldown::Cooldown;
use crate::entities::Entity;
use crate::error::{GameError, Result};
use crate::formation::EnemyShipFormation;
use crate::platform::{
    Clock, InputSource, KeyBindings, Surface, PAUSE_KEY, QUIT_KEY, RESUME_KEY,
};
use crate::settings::{GameSettings, LevelConfig};
use crate::ship::Ship;
use crate::state::GameState;

/// Distance of the player ships from the bottom edge.
const SHIP_BOTTOM_OFFSET: i32 = 30;

/// Which screen the caller should show next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenCode {
    Exit = 0,
    Title = 1,
    Game = 2,
    HighScores = 3,
    Difficulty = 4,
    Score = 5,
}

impl ScreenCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelPhase {
    Running,
    Paused,
}

/// A player's ship, key bindings and counters for the current level.
#[derive(Debug)]
pub struct Player {
    pub ship: Ship,
    pub keys: KeyBindings,
    pub score: u32,
    pub lives: u32,
    pub bullets_shot: u32,
    pub ships_destroyed: u32,
}

#[derive(Debug)]
pub struct LevelController {
    config: LevelConfig,
    level: u32,
    bonus_life: bool,
    formation: EnemyShipFormation,
    players: Vec<Player>,
    bonus_ship: BonusShip,
    bullets: Bullets,
    /// Locks input while the start countdown runs.
    input_delay: Cooldown,
    /// Runs between the level being decided and the level ending.
    screen_finished: Cooldown,
    level_finished: bool,
    finished: bool,
    quit: bool,
    phase: LevelPhase,
    life_bonus_applied: bool,
}

impl LevelController {
    /// Set up a level for one or two players. With `bonus_life`, every
    /// player still in the game and short of the maximum gets a life.
    pub fn new<R: Rng + ?Sized>(
        config: &LevelConfig,
        settings: &GameSettings,
        states: &[GameState],
        bonus_life: bool,
        now: u64,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        if states.is_empty() || states.len() > 2 {
            return Err(GameError::PlayerCount(states.len()));
        }
        let count = states.len() as i32;
        let level = states[0].level();

        let players = states
            .iter()
            .enumerate()
            .map(|(index, state)| {
                let mut lives = state.lives_remaining();
                if bonus_life && lives > 0 && lives < config.max_lives {
                    lives += 1;
                }
                let x = config.width * (index as i32 + 1) / (count + 1);
                Ok(Player {
                    ship: Ship::new(x, config.height - SHIP_BOTTOM_OFFSET, index)?,
                    keys: KeyBindings::for_player(index),
                    score: state.score(),
                    lives,
                    bullets_shot: state.bullets_shot(),
                    ships_destroyed: state.ships_destroyed(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let formation =
            EnemyShipFormation::new(settings, config.width, config.height, now, rng)?;
        let bonus_ship = BonusShip::new(config, now, rng)?;

        let mut input_delay = Cooldown::new(config.input_delay_ms)?;
        input_delay.reset(now, rng);
        let screen_finished = Cooldown::new(config.screen_change_interval_ms)?;

        info!(
            "Starting level {} for {} player(s){}",
            level,
            count,
            if bonus_life { " with a bonus life" } else { "" }
        );

        Ok(Self {
            config: config.clone(),
            level,
            bonus_life,
            formation,
            players,
            bonus_ship,
            bullets: Bullets::new(),
            input_delay,
            screen_finished,
            level_finished: false,
            finished: false,
            quit: false,
            phase: LevelPhase::Running,
            life_bonus_applied: false,
        })
    }

    // ── Frame update ─────────────────────────────────────────────────────────

    /// Advance the level by one frame.
    pub fn update<I: InputSource + ?Sized, R: Rng + ?Sized>(
        &mut self,
        now: u64,
        input: &I,
        rng: &mut R,
    ) -> CollisionReport {
        if self.finished {
            return CollisionReport::default();
        }

        if input.is_key_down(QUIT_KEY) {
            info!("Level {} abandoned", self.level);
            self.quit = true;
            self.finished = true;
            return CollisionReport::default();
        }

        if self.phase == LevelPhase::Paused {
            if !input.is_key_down(RESUME_KEY) {
                return CollisionReport::default();
            }
            self.phase = LevelPhase::Running;
            info!("Game resumed");
        }

        // ── 1. Input, bonus ship, pause, movement ────────────────────────────
        if self.input_delay.check_finished(now) && !self.level_finished {
            self.handle_player_input(now, input, rng);

            self.bonus_ship.update(self.config.width, now, rng);

            // The frame still completes; the pause holds from the next one.
            if input.is_key_down(PAUSE_KEY) {
                self.phase = LevelPhase::Paused;
                info!("Game paused");
            }

            for player in &mut self.players {
                player.ship.update(now);
            }

            self.formation.update();
            self.formation.shoot(&mut self.bullets, now, rng);
        }

        // ── 2. Bullets ───────────────────────────────────────────────────────
        self.bullets.advance();

        // ── 3. Collisions and cleanup ────────────────────────────────────────
        let mut report = manage_collisions(
            &mut self.bullets,
            &mut self.players,
            &mut self.formation,
            &mut self.bonus_ship,
            self.level_finished,
            now,
            rng,
        );
        report.recycled += clean_bullets(&mut self.bullets, &self.config);

        // ── 4. Level end ─────────────────────────────────────────────────────
        self.check_level_end(now, rng);

        report
    }

    fn handle_player_input<I: InputSource + ?Sized, R: Rng + ?Sized>(
        &mut self,
        now: u64,
        input: &I,
        rng: &mut R,
    ) {
        let width = self.config.width;
        for player in &mut self.players {
            if player.ship.is_destroyed() || player.lives == 0 {
                continue;
            }
            let move_right = input.is_key_down(player.keys.right);
            let move_left = input.is_key_down(player.keys.left);

            let ship = &mut player.ship;
            let is_right_border = ship.x() + ship.width() + ship.speed() > width - 1;
            let is_left_border = ship.x() - ship.speed() < 1;

            if move_right && !is_right_border {
                ship.move_right();
            }
            if move_left && !is_left_border {
                ship.move_left();
            }
            if input.is_key_down(player.keys.shoot) && ship.shoot(&mut self.bullets, now, rng) {
                player.bullets_shot += 1;
            }
        }
    }

    fn check_level_end<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) {
        let any_alive = self.players.iter().any(|p| p.lives > 0);
        if (self.formation.is_empty() || !any_alive) && !self.level_finished {
            self.level_finished = true;
            self.screen_finished.reset(now, rng);
            if any_alive {
                info!("Level {} cleared", self.level);
            } else {
                info!("No lives left on level {}", self.level);
            }
        }

        if self.level_finished && self.screen_finished.check_finished(now) {
            self.finished = true;
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    /// Paint the current frame.
    pub fn draw<S: Surface + ?Sized>(&self, now: u64, surface: &mut S) -> Result<()> {
        surface.init_drawing()?;

        if self.phase == LevelPhase::Paused {
            surface.draw_pause_menu()?;
            return surface.complete_drawing();
        }

        for player in &self.players {
            // A ship with no lives left stays visible while it explodes.
            if player.lives > 0 || player.ship.is_destroyed() {
                let ship = &player.ship;
                surface.draw_entity(ship.sprite(), ship.x(), ship.y())?;
            }
        }

        if let Some(special) = self.bonus_ship.visible() {
            surface.draw_entity(special.sprite(), special.x(), special.y())?;
        }

        for enemy in self.formation.iter_visible() {
            surface.draw_entity(enemy.sprite(), enemy.x(), enemy.y())?;
        }

        for bullet in self.bullets.iter() {
            surface.draw_entity(bullet.sprite(), bullet.x(), bullet.y())?;
        }

        for (index, player) in self.players.iter().enumerate() {
            surface.draw_score(index, player.score)?;
            surface.draw_lives(index, player.lives)?;
        }
        surface.draw_horizontal_line(self.config.separation_line_height - 1)?;

        if !self.input_delay.check_finished(now) {
            let countdown = self.input_delay.remaining(now) / 1000;
            surface.draw_countdown(self.level, countdown, self.bonus_life)?;
            let height = self.config.height;
            surface.draw_horizontal_line(height / 2 - height / 12)?;
            surface.draw_horizontal_line(height / 2 + height / 12)?;
        }

        surface.complete_drawing()
    }

    // ── Run loop ─────────────────────────────────────────────────────────────

    /// Play the level to its end at the configured frame rate, award the
    /// spare-life bonus and report which screen comes next.
    pub fn run<C, I, S, R>(
        &mut self,
        clock: &C,
        input: &mut I,
        surface: &mut S,
        rng: &mut R,
    ) -> Result<ScreenCode>
    where
        C: Clock + ?Sized,
        I: InputSource + ?Sized,
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let frame_ms = self.config.frame_ms();

        while !self.finished {
            let frame_start = clock.now();
            input.poll();
            self.update(frame_start, &*input, rng);
            self.draw(clock.now(), surface)?;

            let elapsed = clock.now().saturating_sub(frame_start);
            if elapsed < frame_ms {
                clock.sleep(frame_ms - elapsed);
            }
        }

        self.apply_life_bonus();
        for (index, player) in self.players.iter().enumerate() {
            info!(
                "Screen cleared with a score of {} for player {}",
                player.score,
                index + 1
            );
        }
        Ok(self.next_screen())
    }

    /// Add the per-life bonus for every life beyond the one in play. Only
    /// the first call has an effect.
    pub fn apply_life_bonus(&mut self) {
        if self.life_bonus_applied || self.quit {
            return;
        }
        self.life_bonus_applied = true;
        for player in &mut self.players {
            player.score += self.config.life_score * player.lives.saturating_sub(1);
        }
    }

    /// Screen to show once this level is over.
    pub fn next_screen(&self) -> ScreenCode {
        if self.quit {
            ScreenCode::Exit
        } else if self.players.iter().any(|p| p.lives > 0) && self.level < self.config.num_levels {
            ScreenCode::Game
        } else {
            ScreenCode::Score
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// Per-player snapshot of the current counters.
    pub fn game_states(&self) -> Vec<GameState> {
        self.players
            .iter()
            .map(|p| GameState::new(self.level, p.score, p.lives, p.bullets_shot, p.ships_destroyed))
            .collect()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bonus_life(&self) -> bool {
        self.bonus_life
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// The level has been decided and the post-level delay is running.
    pub fn is_level_finished(&self) -> bool {
        self.level_finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_input_locked(&self, now: u64) -> bool {
        !self.input_delay.check_finished(now)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub fn formation(&self) -> &EnemyShipFormation {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut EnemyShipFormation {
        &mut self.formation
    }

    pub fn bonus_ship(&self) -> &BonusShip {
        &self.bonus_ship
    }

    pub fn bullets(&self) -> &Bullets {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut Bullets {
        &mut self.bullets
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }
}
