/// Game entity types. Mostly data; the only logic here is geometry and
/// animation bookkeeping shared by every entity.

use rand::Rng;

use crate::constants::*;
use crate::timer::{Cooldown, SpawnSchedule};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding rectangle in world pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Overlap with positive area. Rectangles that only share an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

/// Fractional frame counter cycling over `frames` images.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frame: f32,
    step: f32,
    frames: usize,
}

impl Animation {
    pub fn new(step: f32, frames: usize) -> Self {
        Self {
            frame: 0.0,
            step,
            frames: frames.max(1),
        }
    }

    pub fn player() -> Self {
        Self::new(PLAYER_FRAME_STEP, PLAYER_FRAMES)
    }

    pub fn obstacle() -> Self {
        Self::new(OBSTACLE_FRAME_STEP, OBSTACLE_FRAMES)
    }

    pub fn heart() -> Self {
        Self::new(HEART_FRAME_STEP, HEART_FRAMES)
    }

    pub fn advance(&mut self) {
        self.frame += self.step;
        let frames = self.frames as f32;
        if self.frame >= frames {
            self.frame -= frames;
        }
    }

    /// Index of the image to show right now.
    pub fn index(&self) -> usize {
        (self.frame as usize).min(self.frames - 1)
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// Sprite rotation derived from vertical input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tilt {
    Climb,
    Dive,
    #[default]
    Level,
}

impl Tilt {
    pub fn degrees(self) -> i32 {
        match self {
            Tilt::Climb => TILT_DEGREES,
            Tilt::Dive => -TILT_DEGREES,
            Tilt::Level => 0,
        }
    }
}

/// Obstacle colour. Purely visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Blue,
    Grey,
    Red,
    Yellow,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Blue,
        ObstacleKind::Grey,
        ObstacleKind::Red,
        ObstacleKind::Yellow,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Tag the render adapter switches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player(Tilt),
    Projectile,
    Obstacle(ObstacleKind),
}

// ── Entity capability ─────────────────────────────────────────────────────────

/// What every movable thing on the play-field can report.
pub trait Entity {
    fn kind(&self) -> EntityKind;

    fn position(&self) -> (i32, i32);

    fn size(&self) -> (i32, i32);

    fn bounds(&self) -> Rect {
        let (x, y) = self.position();
        let (w, h) = self.size();
        Rect::new(x, y, w, h)
    }

    fn animation_frame(&self) -> usize {
        0
    }

    fn collides_with(&self, other: &dyn Entity) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

/// One drawable item handed to the render adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderable {
    pub kind: EntityKind,
    pub x: i32,
    pub y: i32,
    pub frame: usize,
}

impl Renderable {
    pub fn of(entity: &dyn Entity) -> Self {
        let (x, y) = entity.position();
        Self {
            kind: entity.kind(),
            x,
            y,
            frame: entity.animation_frame(),
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub lives: u32,
    pub score: u32,
    pub tilt: Tilt,
    pub animation: Animation,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            lives: STARTING_LIVES,
            score: 0,
            tilt: Tilt::Level,
            animation: Animation::player(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_X, PLAYER_START_Y)
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player(self.tilt)
    }

    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn size(&self) -> (i32, i32) {
        (PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn animation_frame(&self) -> usize {
        self.animation.index()
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
}

impl Projectile {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Entity for Projectile {
    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn size(&self) -> (i32, i32) {
        (PROJECTILE_SIZE, PROJECTILE_SIZE)
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub kind: ObstacleKind,
    pub animation: Animation,
}

impl Obstacle {
    pub fn new(x: i32, y: i32, kind: ObstacleKind) -> Self {
        Self {
            x,
            y,
            kind,
            animation: Animation::obstacle(),
        }
    }
}

impl Entity for Obstacle {
    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle(self.kind)
    }

    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn size(&self) -> (i32, i32) {
        (OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }

    fn animation_frame(&self) -> usize {
        self.animation.index()
    }
}

// ── Controls ──────────────────────────────────────────────────────────────────

/// Per-tick snapshot of what the player is asking for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlIntents {
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub restart: bool,
    pub quit: bool,
}

// ── Game status ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Terminated,
}

// ── Engine state ──────────────────────────────────────────────────────────────

/// Everything the per-tick update reads and writes.
#[derive(Clone, Debug)]
pub struct EngineState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub fire_cooldown: Cooldown,
    pub spawn_schedule: SpawnSchedule,
    /// HUD heart animation.
    pub hearts: Animation,
    /// Horizontal background offset in `0..WORLD_WIDTH`.
    pub background_scroll: i32,
    pub frame: u64,
}
