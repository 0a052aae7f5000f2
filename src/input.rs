/// Keyboard → `ControlIntents`.
///
/// Instead of acting on each key event individually we record the time of
/// the last press/repeat for every key. A key counts as held while that
/// timestamp is within `HOLD_WINDOW_MS`, so Space and ↑/↓ can be held at
/// the same time.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): keys stay held from
///   `Press` until their `Release` arrives, however long the OS waits
///   before the first repeat.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW_MS` of silence, which
///   is longer than the OS repeat interval.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::{ControlIntents, GameStatus};

/// OS key-repeat runs at 15 Hz or faster, so ~133 ms covers one gap.
pub const HOLD_WINDOW_MS: u64 = 140;

const UP_KEYS: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const FIRE_KEYS: [KeyCode; 1] = [KeyCode::Char(' ')];

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the time it was last seen (press or repeat).
    last_seen: HashMap<KeyCode, u64>,
    /// The terminal reports `Release`, so held keys never time out.
    release_events: bool,
    quit: bool,
    restart: bool,
    decline: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    /// Feed one terminal event observed at `now_ms`.
    pub fn handle(&mut self, event: &Event, now_ms: u64) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        match kind {
            KeyEventKind::Press => {
                self.last_seen.insert(*code, now_ms);
                match code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('r')
                    | KeyCode::Char('R') => self.restart = true,
                    KeyCode::Char('n') | KeyCode::Char('N') => self.decline = true,
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(*code, now_ms);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(code);
            }
        }
    }

    pub fn is_held(&self, key: &KeyCode, now_ms: u64) -> bool {
        self.last_seen
            .get(key)
            .map(|&last| self.release_events || now_ms.saturating_sub(last) <= HOLD_WINDOW_MS)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], now_ms: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, now_ms))
    }

    /// Snapshot the intents for this tick. One-shot presses (restart,
    /// decline) are consumed; quit stays latched.
    ///
    /// `N` only means quit on the game-over prompt.
    pub fn intents(&mut self, status: GameStatus, now_ms: u64) -> ControlIntents {
        let game_over = status == GameStatus::GameOver;
        let intents = ControlIntents {
            up: self.any_held(&UP_KEYS, now_ms),
            down: self.any_held(&DOWN_KEYS, now_ms),
            fire: self.any_held(&FIRE_KEYS, now_ms),
            restart: self.restart && game_over,
            quit: self.quit || (self.decline && game_over),
        };
        self.restart = false;
        self.decline = false;
        intents
    }
}
