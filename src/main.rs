mod args;
mod display;
mod keyboard;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use env_logger::{Builder, Env, Target};
use log::{info, warn};
use rand::thread_rng;
use serde::{Deserialize, Serialize};

use invaders::platform::{Key, KeyBindings, SystemClock, PAUSE_KEY, QUIT_KEY, RESUME_KEY};
use invaders::{Campaign, Difficulty, GameState, LevelConfig, Result, ScreenCode, SettingsTable};

use crate::args::CliArgs;
use crate::display::{draw_score_screen, TerminalSurface};
use crate::keyboard::HeldKeys;

// ── High-score persistence ────────────────────────────────────────────────────

/// Best run on record.
#[derive(Debug, Serialize, Deserialize)]
struct HighScore {
    score: u32,
    difficulty: Difficulty,
    run: GameState,
}

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".invaders_score.json")
}

fn load_high_score() -> Option<HighScore> {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
}

fn save_high_score(high_score: &HighScore) {
    let written = serde_json::to_string_pretty(high_score)
        .map_err(invaders::GameError::from)
        .and_then(|json| Ok(std::fs::write(high_score_path(), json)?));
    if let Err(e) = written {
        warn!("Could not save the high score: {}", e);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn key_label(key: Key) -> &'static str {
    match key {
        Key::A => "A",
        Key::D => "D",
        Key::Space => "SPACE",
        Key::Left => "←",
        Key::Right => "→",
        Key::Slash => "/",
        Key::Escape => "ESC",
        Key::R => "R",
        Key::Q => "Q",
    }
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Normal => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

/// Menu rows, top to bottom. Tier rows summarise the formation growth from
/// the first level to the last; control rows list every player's keys.
fn menu_lines(table: &SettingsTable, high_score: u32, players: usize) -> Vec<(String, Color)> {
    let mut lines = vec![("★  INVADERS  ★".to_string(), Color::Cyan)];
    if high_score > 0 {
        lines.push((format!("Best Score: {}", high_score), Color::Yellow));
    }
    lines.push((String::new(), Color::Reset));

    for (index, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        let tier = table.tier(difficulty);
        let span = match (tier.first(), tier.last()) {
            (Some(first), Some(last)) => format!(
                "{}x{} to {}x{} enemies",
                first.formation_width, first.formation_height, last.formation_width, last.formation_height
            ),
            _ => String::new(),
        };
        lines.push((
            format!("[{}] {:<8} {}", index + 1, difficulty.as_str(), span),
            difficulty_color(difficulty),
        ));
    }
    lines.push((String::new(), Color::Reset));

    for player in 0..players {
        let keys = KeyBindings::for_player(player);
        lines.push((
            format!(
                "P{}  {} {} move   {} shoot",
                player + 1,
                key_label(keys.left),
                key_label(keys.right),
                key_label(keys.shoot)
            ),
            Color::White,
        ));
    }
    lines.push((
        format!(
            "{} pause   {} resume   {} quit",
            key_label(PAUSE_KEY),
            key_label(RESUME_KEY),
            key_label(QUIT_KEY)
        ),
        Color::DarkGrey,
    ));
    lines
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    table: &SettingsTable,
    high_score: u32,
    players: usize,
) -> Result<Option<Difficulty>> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let lines = menu_lines(table, high_score, players);
    let top = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (row, (text, color)) in lines.iter().enumerate() {
        let column = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(column, top + row as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Char(c @ '1'..='3') => {
                    return Ok(Difficulty::from_str(&c.to_string()));
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(None),
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(None),
        }
    }
}

/// Block until a key is pressed. Returns false when the input thread is gone.
fn wait_for_key(rx: &mpsc::Receiver<Event>) -> bool {
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            })) => return true,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    // The terminal is in raw mode, so log lines go to a file instead.
    let file = File::create("log")?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    if args.show_help {
        CliArgs::print_help();
        return Ok(());
    }

    init_logging()?;

    let table = match &args.settings_path {
        Some(path) => SettingsTable::load(path)?,
        None => SettingsTable::default(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &args, table);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &CliArgs,
    table: SettingsTable,
) -> Result<()> {
    let mut high_score = load_high_score();
    let mut preselected = args.difficulty;
    let config = LevelConfig::default();
    let clock = SystemClock::new();
    let mut rng = thread_rng();

    loop {
        let best = high_score.as_ref().map_or(0, |h| h.score);
        let difficulty = match preselected.take() {
            Some(difficulty) => difficulty,
            None => match show_menu(out, rx, &table, best, args.players)? {
                Some(difficulty) => difficulty,
                None => break,
            },
        };

        let campaign = Campaign::new(table.clone(), difficulty, config.clone())?;
        let outcome = {
            let mut keys = HeldKeys::new(rx);
            let mut surface = TerminalSurface::new(&mut *out, &config, terminal::size()?);
            campaign.play(args.players, &clock, &mut keys, &mut surface, &mut rng)?
        };

        // Persist new high score if beaten
        if let Some(top) = outcome.states.iter().max_by_key(|s| s.score()) {
            if top.score() > best {
                info!("New high score: {}", top.score());
                let record = HighScore {
                    score: top.score(),
                    difficulty,
                    run: *top,
                };
                save_high_score(&record);
                high_score = Some(record);
            }
        }

        if outcome.code == ScreenCode::Exit {
            break;
        }

        draw_score_screen(out, &outcome.states, best)?;
        if !wait_for_key(rx) {
            break;
        }
        // Otherwise loop back to the menu
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_tier_and_each_players_keys() {
        let lines = menu_lines(&SettingsTable::default(), 0, 2);
        let texts: Vec<&str> = lines.iter().map(|(text, _)| text.as_str()).collect();

        assert!(texts.iter().any(|t| t.starts_with("[1] easy     5x4 to ")));
        assert!(texts.iter().any(|t| t.starts_with("[3] hard ")));
        assert!(texts.contains(&"P1  A D move   SPACE shoot"));
        assert!(texts.contains(&"P2  ← → move   / shoot"));
        assert!(texts.contains(&"ESC pause   R resume   Q quit"));
        assert!(!texts.iter().any(|t| t.starts_with("Best Score")));
    }

    #[test]
    fn menu_shows_the_best_score_and_one_player() {
        let lines = menu_lines(&SettingsTable::default(), 1200, 1);
        assert_eq!(lines[1].0, "Best Score: 1200");
        assert!(!lines.iter().any(|(text, _)| text.starts_with("P2")));
    }
}
