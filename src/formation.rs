//! The enemy grid.
//!
//! Slots are laid out row-major and are never removed: a destroyed enemy
//! keeps its slot so column and row bookkeeping stays stable for the whole
//! level. The live count, the live bounding columns/rows and the shooter of
//! each column are updated when an enemy is destroyed, not rescanned every
//! frame.

use log::{debug, info};
use rand::Rng;

use crate::bullet::{BulletOwner, Bullets};
use crate::cooldown::Cooldown;
use crate::entities::{EnemyClass, EnemyShip, Entity};
use crate::error::Result;
use crate::settings::GameSettings;

/// Initial position of the top-left slot.
const INIT_POS_X: i32 = 20;
const INIT_POS_Y: i32 = 100;
/// Distance between neighbouring slots.
const SEPARATION_DISTANCE: i32 = 40;
/// Fraction of rows holding class C enemies.
const PROPORTION_C: f64 = 0.2;
/// Fraction of rows holding class B enemies.
const PROPORTION_B: f64 = 0.4;
const X_SPEED: i32 = 8;
const Y_SPEED: i32 = 4;
/// Drop per edge contact, covered in `Y_SPEED` steps.
const DESCENT_DISTANCE: i32 = 20;
const SIDE_MARGIN: i32 = 20;
const BOTTOM_MARGIN: i32 = 80;
/// Frames between steps when a single enemy is left.
const MINIMUM_SPEED: u32 = 10;
pub const BULLET_SPEED: i32 = 4;

/// Grid coordinate of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub row: usize,
    pub column: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    fn reversed(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Movement state of the grid as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormationPhase {
    Advancing(Heading),
    /// Dropping toward the player, `remaining` pixels left, then heading
    /// off in `then`.
    Descending { remaining: i32, then: Heading },
    Empty,
}

#[derive(Debug)]
pub struct EnemyShipFormation {
    rows: usize,
    columns: usize,
    /// Row-major slots.
    ships: Vec<EnemyShip>,
    /// Destroyed enemies still showing their explosion.
    exploding: Vec<bool>,
    live_count: usize,
    live_per_column: Vec<usize>,
    live_per_row: Vec<usize>,
    /// Bottommost live enemy of each column.
    shooters: Vec<Option<usize>>,
    phase: FormationPhase,
    base_speed: u32,
    movement_interval: u32,
    shooting_cooldown: Cooldown,
    screen_width: i32,
    screen_height: i32,
}

impl EnemyShipFormation {
    /// Build a full grid for `settings` inside a playfield of the given size.
    /// The shooting cooldown starts running at `now`.
    pub fn new<R: Rng + ?Sized>(
        settings: &GameSettings,
        screen_width: i32,
        screen_height: i32,
        now: u64,
        rng: &mut R,
    ) -> Result<Self> {
        let rows = settings.formation_height as usize;
        let columns = settings.formation_width as usize;

        let mut ships = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            let class = class_for_row(row, rows);
            for column in 0..columns {
                ships.push(EnemyShip::new(
                    INIT_POS_X + SEPARATION_DISTANCE * column as i32,
                    INIT_POS_Y + SEPARATION_DISTANCE * row as i32,
                    class,
                ));
            }
        }

        let mut shooting_cooldown = Cooldown::symmetric(
            settings.base_shoot_frequency_ms(),
            settings.shoot_frequency_variance_ms(),
        )?;
        shooting_cooldown.reset(now, rng);

        let shooters = (0..columns)
            .map(|column| rows.checked_sub(1).map(|row| row * columns + column))
            .collect();

        let phase = if ships.is_empty() {
            FormationPhase::Empty
        } else {
            FormationPhase::Advancing(Heading::Right)
        };

        info!("Initializing {}x{} ship formation", columns, rows);

        Ok(Self {
            rows,
            columns,
            exploding: vec![false; ships.len()],
            live_count: ships.len(),
            live_per_column: vec![rows; columns],
            live_per_row: vec![columns; rows],
            shooters,
            ships,
            phase,
            base_speed: settings.base_speed,
            movement_interval: 0,
            shooting_cooldown,
            screen_width,
            screen_height,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    pub fn phase(&self) -> FormationPhase {
        self.phase
    }

    pub fn get(&self, slot: Slot) -> Option<&EnemyShip> {
        if slot.row >= self.rows || slot.column >= self.columns {
            return None;
        }
        self.ships.get(self.index(slot))
    }

    /// Live enemies with their slots, in row-major order.
    pub fn iter_live(&self) -> impl Iterator<Item = (Slot, &EnemyShip)> + '_ {
        self.ships
            .iter()
            .enumerate()
            .filter(|(_, ship)| !ship.is_destroyed())
            .map(move |(i, ship)| (self.slot(i), ship))
    }

    /// Enemies to draw: live ones plus explosions from the current step.
    pub fn iter_visible(&self) -> impl Iterator<Item = &EnemyShip> + '_ {
        self.ships
            .iter()
            .zip(self.exploding.iter())
            .filter(|(ship, exploding)| !ship.is_destroyed() || **exploding)
            .map(|(ship, _)| ship)
    }

    /// Bottommost live enemy of every occupied column.
    pub fn shooters(&self) -> impl Iterator<Item = &EnemyShip> + '_ {
        self.shooters.iter().flatten().map(move |&i| &self.ships[i])
    }

    /// Frames between movement steps at the current live count.
    pub fn step_interval(&self) -> u32 {
        let total = self.ships.len().max(1) as f64;
        let remaining = self.live_count as f64 / total;
        (remaining.powi(2) * f64::from(self.base_speed)) as u32 + MINIMUM_SPEED
    }

    /// Pixel bounds `(left, top, right, bottom)` of the live enemies.
    pub fn live_bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let left_col = self.live_per_column.iter().position(|&n| n > 0)?;
        let right_col = self.live_per_column.iter().rposition(|&n| n > 0)?;
        let top_row = self.live_per_row.iter().position(|&n| n > 0)?;
        let bottom_row = self.live_per_row.iter().rposition(|&n| n > 0)?;
        let top_left = &self.ships[top_row * self.columns + left_col].body;
        let bottom_right = &self.ships[bottom_row * self.columns + right_col].body;
        Some((
            top_left.x,
            top_left.y,
            bottom_right.x + bottom_right.width,
            bottom_right.y + bottom_right.height,
        ))
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// Count one frame and take a movement step when the cadence allows.
    /// Returns whether the grid moved.
    pub fn update(&mut self) -> bool {
        if self.is_empty() {
            self.phase = FormationPhase::Empty;
            return false;
        }

        self.movement_interval += 1;
        if self.movement_interval < self.step_interval() {
            return false;
        }
        self.movement_interval = 0;
        self.step();
        true
    }

    fn step(&mut self) {
        let Some((left, _, right, bottom)) = self.live_bounds() else {
            return;
        };
        let is_at_bottom = bottom > self.screen_height - BOTTOM_MARGIN;
        let is_at_right_side = right >= self.screen_width - SIDE_MARGIN;
        let is_at_left_side = left <= SIDE_MARGIN;

        if let FormationPhase::Descending { remaining, then } = self.phase {
            if remaining <= 0 {
                self.phase = FormationPhase::Advancing(then);
            }
        }

        if let FormationPhase::Advancing(heading) = self.phase {
            let at_edge = match heading {
                Heading::Left => is_at_left_side,
                Heading::Right => is_at_right_side,
            };
            if at_edge {
                self.phase = if is_at_bottom {
                    FormationPhase::Advancing(heading.reversed())
                } else {
                    FormationPhase::Descending {
                        remaining: DESCENT_DISTANCE,
                        then: heading.reversed(),
                    }
                };
            }
        }

        let (dx, dy) = match &mut self.phase {
            FormationPhase::Advancing(Heading::Right) => (X_SPEED, 0),
            FormationPhase::Advancing(Heading::Left) => (-X_SPEED, 0),
            FormationPhase::Descending { remaining, .. } => {
                *remaining -= Y_SPEED;
                (0, Y_SPEED)
            }
            FormationPhase::Empty => (0, 0),
        };

        // Explosions last until the next step.
        self.exploding.iter_mut().for_each(|e| *e = false);

        for ship in &mut self.ships {
            ship.move_by(dx, dy);
            if !ship.is_destroyed() {
                ship.animate();
            }
        }
    }

    /// Fire from a random column shooter once the shooting cooldown is over.
    /// Returns whether a bullet was fired.
    pub fn shoot<R: Rng + ?Sized>(&mut self, bullets: &mut Bullets, now: u64, rng: &mut R) -> bool {
        if !self.shooting_cooldown.check_finished(now) {
            return false;
        }
        let candidates: Vec<usize> = self.shooters.iter().flatten().copied().collect();
        if candidates.is_empty() {
            return false;
        }
        let shooter = &self.ships[candidates[rng.gen_range(0..candidates.len())]];
        self.shooting_cooldown.reset(now, rng);
        bullets.fire(
            shooter.x() + shooter.width() / 2,
            shooter.y(),
            BULLET_SPEED,
            BulletOwner::Enemy,
        );
        true
    }

    // ── Destruction ──────────────────────────────────────────────────────────

    /// Mark the enemy in `slot` destroyed. Returns its point value, or `None`
    /// if the slot was empty or already destroyed.
    pub fn destroy(&mut self, slot: Slot) -> Option<u32> {
        if slot.row >= self.rows || slot.column >= self.columns {
            return None;
        }
        let index = self.index(slot);
        let ship = &mut self.ships[index];
        if ship.is_destroyed() {
            return None;
        }
        ship.destroy();
        let points = ship.point_value();
        self.exploding[index] = true;

        self.live_count -= 1;
        self.live_per_column[slot.column] -= 1;
        self.live_per_row[slot.row] -= 1;
        if self.shooters[slot.column] == Some(index) {
            let next = self.next_shooter(slot.column);
            self.shooters[slot.column] = next;
        }
        if self.live_count == 0 {
            self.phase = FormationPhase::Empty;
        }

        debug!("Destroyed ship in ({},{})", slot.column, slot.row);
        Some(points)
    }

    fn next_shooter(&self, column: usize) -> Option<usize> {
        (0..self.rows)
            .rev()
            .map(|row| row * self.columns + column)
            .find(|&i| !self.ships[i].is_destroyed())
    }

    fn index(&self, slot: Slot) -> usize {
        slot.row * self.columns + slot.column
    }

    fn slot(&self, index: usize) -> Slot {
        Slot {
            row: index / self.columns,
            column: index % self.columns,
        }
    }
}

fn class_for_row(row: usize, rows: usize) -> EnemyClass {
    let proportion = row as f64 / rows as f64;
    if proportion < PROPORTION_C {
        EnemyClass::C
    } else if proportion < PROPORTION_B + PROPORTION_C {
        EnemyClass::B
    } else {
        EnemyClass::A
    }
}
