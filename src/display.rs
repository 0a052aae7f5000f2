/// Rendering layer — all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game. No game logic is performed; this module only scales the 800×500
/// world onto the terminal grid and translates state into crossterm
/// commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::constants::{HEART_FRAMES, PROJECTILE_RADIUS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{EntityKind, GameStatus, ObstacleKind, Renderable, Tilt};
use crate::error::GameError;
use crate::game::Game;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BACKGROUND: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::White;
const C_HEART_BRIGHT: Color = Color::Red;
const C_HEART_DIM: Color = Color::DarkRed;
const C_PLAYER: Color = Color::White;
const C_PROJECTILE: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Sprites ───────────────────────────────────────────────────────────────────

const PROPELLER_FRAMES: [&str; 2] = ["=", "-"];
const WING_FRAMES: [&str; 4] = ["v", "-", "^", "-"];

/// Smallest terminal the play-field can be scaled into.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

pub const GAME_OVER_PROMPT: &str = "Game over. Play again (y or n)?";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal grid the world is drawn into.
///
/// Row 0 is the HUD, rows 1 and `height - 2` are borders, the last row is
/// the controls hint. Columns 0 and `width - 1` are side walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// Fails when the terminal cannot hold the play-field.
    pub fn new(width: u16, height: u16) -> Result<Self, GameError> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(GameError::TerminalTooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        Ok(Self { width, height })
    }

    fn inner_width(&self) -> i32 {
        self.width as i32 - 2
    }

    fn inner_height(&self) -> i32 {
        self.height as i32 - 4
    }

    /// World x → terminal column inside the side walls.
    pub fn column(&self, x: i32) -> u16 {
        let col = 1 + x.clamp(0, WORLD_WIDTH - 1) * self.inner_width() / WORLD_WIDTH;
        col as u16
    }

    /// Start column for a sprite `len` cells wide, pulled left so its last
    /// cell stays inside the right wall.
    pub fn sprite_column(&self, x: i32, len: usize) -> u16 {
        let last = (self.width as i32 - 1 - len as i32).max(1);
        self.column(x).min(last as u16)
    }

    /// A full dot once the projectile is at least a cell wide, a small one
    /// on narrow terminals.
    pub fn projectile_glyph(&self) -> &'static str {
        if 2 * PROJECTILE_RADIUS * self.inner_width() >= WORLD_WIDTH {
            "●"
        } else {
            "•"
        }
    }

    /// World y → terminal row between the borders.
    pub fn row(&self, y: i32) -> u16 {
        let row = 2 + y.clamp(0, WORLD_HEIGHT - 1) * self.inner_height() / WORLD_HEIGHT;
        row as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_background(out, game.engine().background_scroll, view)?;
    draw_border(out, view)?;
    draw_hud(out, game, view)?;

    for item in game.renderables() {
        draw_entity(out, &item, view)?;
    }

    draw_controls_hint(out, view)?;

    if game.status() == GameStatus::GameOver {
        draw_game_over(out, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

/// A sparse star field scrolling left with the background offset. Each band
/// repeats every world width so the two halves join seamlessly.
fn draw_background<W: Write>(out: &mut W, scroll: i32, view: &Viewport) -> std::io::Result<()> {
    const BANDS: [(i32, i32); 4] = [(80, 0), (180, 130), (300, 60), (420, 210)];

    out.queue(style::SetForegroundColor(C_BACKGROUND))?;
    for (y, phase) in BANDS {
        let mut x = phase;
        while x < WORLD_WIDTH {
            let shifted = (x - scroll).rem_euclid(WORLD_WIDTH);
            out.queue(cursor::MoveTo(view.column(shifted), view.row(y)))?;
            out.queue(Print("·"))?;
            x += 260;
        }
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    // Hearts pulse over the heart animation: bright for the first half.
    let heart_color = if game.engine().hearts.index() < HEART_FRAMES / 2 {
        C_HEART_BRIGHT
    } else {
        C_HEART_DIM
    };
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(heart_color))?;
    out.queue(Print("♥ ".repeat(game.lives() as usize)))?;

    let score = score_text(game.score());
    let sx = (view.width / 4).max(12);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(score))?;

    Ok(())
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(out: &mut W, item: &Renderable, view: &Viewport) -> std::io::Result<()> {
    let (sprite, color) = match item.kind {
        EntityKind::Player(tilt) => (player_sprite(tilt, item.frame), C_PLAYER),
        EntityKind::Projectile => (view.projectile_glyph().to_string(), C_PROJECTILE),
        EntityKind::Obstacle(kind) => (obstacle_sprite(item.frame), obstacle_color(kind)),
    };
    let col = view.sprite_column(item.x, sprite.chars().count());
    out.queue(cursor::MoveTo(col, view.row(item.y)))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

/// Propeller, fuselage and a nose that follows the tilt.
pub fn player_sprite(tilt: Tilt, frame: usize) -> String {
    let propeller = PROPELLER_FRAMES[frame % PROPELLER_FRAMES.len()];
    let nose = match tilt.degrees().signum() {
        1 => "◥",
        -1 => "◢",
        _ => "►",
    };
    format!("{}═{}", propeller, nose)
}

/// Beak facing left, wings flapping through the frames.
pub fn obstacle_sprite(frame: usize) -> String {
    format!("<{}", WING_FRAMES[frame % WING_FRAMES.len()])
}

fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Blue => Color::Blue,
        ObstacleKind::Grey => Color::Grey,
        ObstacleKind::Red => Color::Red,
        ObstacleKind::Yellow => Color::Yellow,
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑ ↓ / W S : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let col = (view.width / 2).saturating_sub(GAME_OVER_PROMPT.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, view.height / 2))?;
    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(Print(GAME_OVER_PROMPT))?;
    Ok(())
}
