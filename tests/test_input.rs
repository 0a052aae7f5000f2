use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use side_scroller::entities::GameStatus;
use side_scroller::input::*;

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn repeat(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat))
}

fn release(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release))
}

// ── Held keys ─────────────────────────────────────────────────────────────────

#[test]
fn nothing_pressed_means_no_intents() {
    let mut keys = KeyTracker::new(false);
    let intents = keys.intents(GameStatus::Playing, 0);
    assert!(!intents.up && !intents.down && !intents.fire);
    assert!(!intents.restart && !intents.quit);
}

#[test]
fn arrow_and_letter_keys_both_steer() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Up), 0);
    assert!(keys.intents(GameStatus::Playing, 10).up);

    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Char('s')), 0);
    assert!(keys.intents(GameStatus::Playing, 10).down);
}

#[test]
fn fire_and_move_held_together() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Char(' ')), 0);
    keys.handle(&press(KeyCode::Down), 5);
    let intents = keys.intents(GameStatus::Playing, 20);
    assert!(intents.fire);
    assert!(intents.down);
    assert!(!intents.up);
}

#[test]
fn held_key_expires_without_repeats() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Up), 1_000);
    assert!(keys.is_held(&KeyCode::Up, 1_000 + HOLD_WINDOW_MS));
    assert!(!keys.is_held(&KeyCode::Up, 1_001 + HOLD_WINDOW_MS));
}

#[test]
fn repeat_refreshes_hold() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Up), 0);
    keys.handle(&repeat(KeyCode::Up), 100);
    assert!(keys.is_held(&KeyCode::Up, 200));
}

#[test]
fn release_drops_key_immediately() {
    let mut keys = KeyTracker::new(true);
    keys.handle(&press(KeyCode::Char(' ')), 0);
    keys.handle(&release(KeyCode::Char(' ')), 5);
    assert!(!keys.intents(GameStatus::Playing, 6).fire);
}

#[test]
fn release_aware_terminal_holds_key_until_release() {
    let mut keys = KeyTracker::new(true);
    keys.handle(&press(KeyCode::Up), 0);
    // No repeats yet: the OS is still in its initial repeat delay
    assert!(keys.intents(GameStatus::Playing, 100).up);
    assert!(keys.intents(GameStatus::Playing, 300).up);
    assert!(keys.intents(GameStatus::Playing, 499).up);

    keys.handle(&release(KeyCode::Up), 600);
    assert!(!keys.intents(GameStatus::Playing, 601).up);
}

#[test]
fn classic_terminal_release_also_drops_key() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Down), 0);
    keys.handle(&release(KeyCode::Down), 5);
    assert!(!keys.intents(GameStatus::Playing, 6).down);
}

#[test]
fn non_key_events_are_ignored() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&Event::Resize(80, 24), 0);
    keys.handle(&Event::FocusLost, 0);
    assert_eq!(keys.intents(GameStatus::Playing, 0), Default::default());
}

// ── One-shot keys ─────────────────────────────────────────────────────────────

#[test]
fn escape_q_and_ctrl_c_quit_in_any_state() {
    for event in [
        press(KeyCode::Esc),
        press(KeyCode::Char('q')),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ] {
        let mut keys = KeyTracker::new(false);
        keys.handle(&event, 0);
        assert!(keys.intents(GameStatus::Playing, 1).quit);
    }
}

#[test]
fn quit_stays_latched() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Esc), 0);
    assert!(keys.intents(GameStatus::Playing, 1).quit);
    assert!(keys.intents(GameStatus::Playing, 10_000).quit);
}

#[test]
fn plain_c_does_not_quit() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Char('c')), 0);
    assert!(!keys.intents(GameStatus::Playing, 1).quit);
}

#[test]
fn yes_restarts_only_on_game_over() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Char('y')), 0);
    assert!(!keys.intents(GameStatus::Playing, 1).restart);

    // The press during play was consumed and does not leak into game over
    assert!(!keys.intents(GameStatus::GameOver, 2).restart);

    keys.handle(&press(KeyCode::Char('y')), 3);
    assert!(keys.intents(GameStatus::GameOver, 4).restart);
    assert!(!keys.intents(GameStatus::GameOver, 5).restart);
}

#[test]
fn no_quits_only_on_game_over() {
    let mut keys = KeyTracker::new(false);
    keys.handle(&press(KeyCode::Char('n')), 0);
    assert!(!keys.intents(GameStatus::Playing, 1).quit);

    keys.handle(&press(KeyCode::Char('N')), 2);
    assert!(keys.intents(GameStatus::GameOver, 3).quit);
}
