//! Rendering layer: all terminal I/O lives here.
//!
//! The simulation works in logical pixels. `TerminalSurface` maps them onto
//! character cells, centres the playfield in the terminal and clips anything
//! that falls outside it. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use invaders::entities::Sprite;
use invaders::platform::Surface;
use invaders::{GameState, LevelConfig, Result};

/// Logical pixels per terminal column.
const CELL_WIDTH: i32 = 8;
/// Logical pixels per terminal row.
const CELL_HEIGHT: i32 = 13;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::DarkRed;
const C_ENEMY_A: Color = Color::Green;
const C_ENEMY_B: Color = Color::Cyan;
const C_ENEMY_C: Color = Color::Red;
const C_ENEMY_SPECIAL: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Yellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// Two-row glyphs and colour of a sprite. The first row is drawn at the
/// entity's cell, the second one row below.
fn glyphs(sprite: Sprite) -> (&'static str, &'static str, Color) {
    match sprite {
        Sprite::Ship => (" ▲ ", "/█\\", C_PLAYER),
        Sprite::ShipDestroyed => (" ✶ ", "░▒░", C_PLAYER_HIT),
        Sprite::Bullet => ("║", "", C_BULLET_PLAYER),
        Sprite::EnemyBullet => ("↓", "", C_BULLET_ENEMY),
        Sprite::EnemyShipA1 => ("«▼»", "╚═╝", C_ENEMY_A),
        Sprite::EnemyShipA2 => ("«▼»", "╝═╚", C_ENEMY_A),
        Sprite::EnemyShipB1 => ("(◎)", "╰─╯", C_ENEMY_B),
        Sprite::EnemyShipB2 => ("(◉)", "╯─╰", C_ENEMY_B),
        Sprite::EnemyShipC1 => ("/◆\\", "< >", C_ENEMY_C),
        Sprite::EnemyShipC2 => ("/◆\\", "> <", C_ENEMY_C),
        Sprite::EnemyShipSpecial => ("<◈◈>", "", C_ENEMY_SPECIAL),
        Sprite::Explosion => ("\\|/", "/|\\", C_EXPLOSION),
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    /// Playfield size in cells.
    columns: u16,
    rows: u16,
    /// Terminal cell of the playfield's top-left corner.
    origin_x: u16,
    origin_y: u16,
}

impl<W: Write> TerminalSurface<W> {
    /// Centre a playfield of `config`'s size in a terminal of
    /// `terminal_size` cells.
    pub fn new(out: W, config: &LevelConfig, terminal_size: (u16, u16)) -> Self {
        let columns = (config.width / CELL_WIDTH) as u16;
        let rows = (config.height / CELL_HEIGHT) as u16;
        let (term_w, term_h) = terminal_size;
        Self {
            out,
            columns,
            rows,
            origin_x: term_w.saturating_sub(columns + 2) / 2 + 1,
            origin_y: term_h.saturating_sub(rows + 2) / 2 + 1,
        }
    }

    /// Terminal cell for a logical position, if it lies on the playfield.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 {
            return None;
        }
        let column = x / CELL_WIDTH;
        let row = y / CELL_HEIGHT;
        if column >= i32::from(self.columns) || row >= i32::from(self.rows) {
            return None;
        }
        Some((self.origin_x + column as u16, self.origin_y + row as u16))
    }

    fn print_at(&mut self, column: u16, row: u16, text: &str, color: Color) -> Result<()> {
        self.out.queue(cursor::MoveTo(column, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    /// Print `text` centred on the playfield at `row` cells from its top.
    fn print_centered(&mut self, row: u16, text: &str, color: Color) -> Result<()> {
        let half = text.chars().count() as u16 / 2;
        let column = (self.origin_x + self.columns / 2).saturating_sub(half);
        self.print_at(column, self.origin_y + row, text, color)
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> Result<()> {
        let w = self.columns as usize;
        let left = self.origin_x.saturating_sub(1);
        let top = self.origin_y.saturating_sub(1);

        self.print_at(left, top, &format!("┌{}┐", "─".repeat(w)), C_BORDER)?;
        self.print_at(left, self.origin_y + self.rows, &format!("└{}┘", "─".repeat(w)), C_BORDER)?;
        for row in 0..self.rows {
            self.print_at(left, self.origin_y + row, "│", C_BORDER)?;
            self.print_at(self.origin_x + self.columns, self.origin_y + row, "│", C_BORDER)?;
        }
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> Result<()> {
        let row = self.origin_y + self.rows + 1;
        self.print_at(
            self.origin_x,
            row,
            "A D / ← → : Move   SPACE / / : Shoot   ESC : Pause   Q : Quit",
            C_HINT,
        )
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn init_drawing(&mut self) -> Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_controls_hint()
    }

    fn draw_entity(&mut self, sprite: Sprite, x: i32, y: i32) -> Result<()> {
        let (top, bottom, color) = glyphs(sprite);
        if let Some((column, row)) = self.cell(x, y) {
            self.print_at(column, row, top, color)?;
        }
        if !bottom.is_empty() {
            if let Some((column, row)) = self.cell(x, y + CELL_HEIGHT) {
                self.print_at(column, row, bottom, color)?;
            }
        }
        Ok(())
    }

    fn draw_horizontal_line(&mut self, y: i32) -> Result<()> {
        if let Some((column, row)) = self.cell(0, y) {
            let line = "─".repeat(self.columns as usize);
            self.print_at(column, row, &line, C_BORDER)?;
        }
        Ok(())
    }

    fn draw_score(&mut self, player: usize, score: u32) -> Result<()> {
        let text = format!("P{} Score:{:>6}", player + 1, score);
        let column = if player == 0 {
            self.origin_x + 1
        } else {
            (self.origin_x + self.columns).saturating_sub(text.chars().count() as u16 + 1)
        };
        self.print_at(column, self.origin_y, &text, C_HUD_SCORE)
    }

    fn draw_lives(&mut self, player: usize, lives: u32) -> Result<()> {
        let text = format!("Lives:{:<3}", "♥".repeat(lives as usize));
        let column = if player == 0 {
            self.origin_x + 1
        } else {
            (self.origin_x + self.columns).saturating_sub(text.chars().count() as u16 + 1)
        };
        self.print_at(column, self.origin_y + 1, &text, C_HUD_LIVES)
    }

    fn draw_countdown(&mut self, level: u32, seconds: u64, bonus_life: bool) -> Result<()> {
        let middle = self.rows / 2;
        let headline = if bonus_life {
            format!("Level {} - Bonus life!", level)
        } else {
            format!("Level {}", level)
        };
        self.print_centered(middle.saturating_sub(1), &headline, Color::White)?;
        let count = if seconds == 0 {
            "GO!".to_string()
        } else {
            seconds.to_string()
        };
        self.print_centered(middle, &count, Color::Yellow)
    }

    fn draw_pause_menu(&mut self) -> Result<()> {
        let lines: [(&str, Color); 5] = [
            ("╔════════════════════╗", Color::Cyan),
            ("║       PAUSED       ║", Color::Cyan),
            ("╚════════════════════╝", Color::Cyan),
            ("R - Resume", Color::White),
            ("Q - Quit", Color::White),
        ];
        let start = (self.rows / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (text, color)) in lines.iter().enumerate() {
            self.print_centered(start + i as u16, text, *color)?;
        }
        Ok(())
    }

    fn complete_drawing(&mut self) -> Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.flush()?;
        Ok(())
    }
}

// ── Score screen ──────────────────────────────────────────────────────────────

/// Final scores of a finished run, with the best score on record.
pub fn draw_score_screen<W: Write>(
    out: &mut W,
    states: &[GameState],
    high_score: u32,
) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;
    let cx = width / 2;

    let best = states.iter().map(GameState::score).max().unwrap_or(0);
    let new_best = best > high_score;

    let mut lines: Vec<(String, Color)> = vec![
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
    ];
    for (i, state) in states.iter().enumerate() {
        lines.push((
            format!("P{} Score: {:>6}  Level {}", i + 1, state.score(), state.level()),
            Color::Yellow,
        ));
        let accuracy = if state.bullets_shot() > 0 {
            f64::from(state.ships_destroyed()) * 100.0 / f64::from(state.bullets_shot())
        } else {
            0.0
        };
        lines.push((
            format!(
                "   {} kills / {} shots ({:.1}%)",
                state.ships_destroyed(),
                state.bullets_shot(),
                accuracy
            ),
            Color::DarkGrey,
        ));
    }
    if new_best {
        lines.push((format!("★ NEW BEST: {:>6} ★", best), Color::Yellow));
    } else {
        lines.push((format!("Best Score:  {:>6}", high_score), Color::DarkGrey));
    }
    lines.push(("Press any key".to_string(), Color::White));

    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
