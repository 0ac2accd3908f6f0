//! Keyboard state built from the crossterm event stream.
//!
//! Input model: instead of acting on each key event individually, we keep a
//! `key_frame` map recording the frame of the last press/repeat event for
//! every key. A key counts as down while that frame is within `HOLD_WINDOW`
//! frames, so movement and fire keys can be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events, keys are dropped on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use invaders::platform::{InputSource, Key};

/// A key is considered held if its last press/repeat event arrived within
/// this many frames. 8 frames at 60 FPS is about 133 ms, shorter than any
/// OS key-repeat interval.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn key_codes(key: Key) -> &'static [KeyCode] {
    match key {
        Key::A => &[KeyCode::Char('a'), KeyCode::Char('A')],
        Key::D => &[KeyCode::Char('d'), KeyCode::Char('D')],
        Key::Space => &[KeyCode::Char(' ')],
        Key::Left => &[KeyCode::Left],
        Key::Right => &[KeyCode::Right],
        Key::Slash => &[KeyCode::Char('/')],
        Key::Escape => &[KeyCode::Esc],
        Key::R => &[KeyCode::Char('r'), KeyCode::Char('R')],
        Key::Q => &[KeyCode::Char('q'), KeyCode::Char('Q')],
    }
}

/// Pause, resume and quit fire once per press instead of while held.
fn is_one_shot(key: Key) -> bool {
    matches!(key, Key::Escape | Key::R | Key::Q)
}

pub struct HeldKeys<'a> {
    rx: &'a mpsc::Receiver<Event>,
    /// Maps each held key to the frame it was last seen.
    key_frame: HashMap<KeyCode, u64>,
    /// Keys pressed since the previous poll.
    pressed: HashSet<KeyCode>,
    frame: u64,
}

impl<'a> HeldKeys<'a> {
    pub fn new(rx: &'a mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            pressed: HashSet::new(),
            frame: 0,
        }
    }
}

impl InputSource for HeldKeys<'_> {
    /// Drain all pending input events without blocking.
    fn poll(&mut self) {
        self.frame += 1;
        self.pressed.clear();

        while let Ok(event) = self.rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    // Ctrl+C behaves like the quit key.
                    let code = match code {
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            KeyCode::Char('q')
                        }
                        other => other,
                    };
                    self.key_frame.insert(code, self.frame);
                    self.pressed.insert(code);
                }
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }
    }

    fn is_key_down(&self, key: Key) -> bool {
        let codes = key_codes(key);
        if is_one_shot(key) {
            codes.iter().any(|code| self.pressed.contains(code))
        } else {
            codes
                .iter()
                .any(|code| is_held(&self.key_frame, code, self.frame))
        }
    }
}
