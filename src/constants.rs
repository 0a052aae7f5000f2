/// Gameplay constants. All distances are world pixels, all times milliseconds.

// World dimensions
pub const WORLD_WIDTH: i32 = 800;
pub const WORLD_HEIGHT: i32 = 500;
pub const PADDING_Y: i32 = 50;

/// Highest (smallest y) the player may reach.
pub const PLAYER_MIN_Y: i32 = PADDING_Y;
/// Lowest (largest y) the player may reach.
pub const PLAYER_MAX_Y: i32 = WORLD_HEIGHT - 2 * PADDING_Y;

// Player
pub const PLAYER_START_X: i32 = 30;
pub const PLAYER_START_Y: i32 = WORLD_HEIGHT / 2;
pub const PLAYER_WIDTH: i32 = 70;
pub const PLAYER_HEIGHT: i32 = 50;
pub const PLAYER_STEP: i32 = 2;
pub const PLAYER_FRAMES: usize = 2;
pub const PLAYER_FRAME_STEP: f32 = 1.0;
pub const STARTING_LIVES: u32 = 3;
pub const TILT_DEGREES: i32 = 15;

// Projectiles
pub const PROJECTILE_SPEED: i32 = 2;
pub const PROJECTILE_RADIUS: i32 = 5;
pub const PROJECTILE_SIZE: i32 = 10;
pub const FIRE_COOLDOWN_MS: u64 = 500;

// Obstacles
pub const OBSTACLE_SPEED: i32 = 2;
pub const OBSTACLE_WIDTH: i32 = 50;
pub const OBSTACLE_HEIGHT: i32 = 36;
pub const OBSTACLE_FRAMES: usize = 4;
pub const OBSTACLE_FRAME_STEP: f32 = 0.25;
pub const SPAWN_WINDOW_MS: u64 = 3000;

// HUD and background
pub const HEART_FRAMES: usize = 8;
pub const HEART_FRAME_STEP: f32 = 0.1;
pub const BACKGROUND_SCROLL_STEP: i32 = 1;

// Loop
pub const DEFAULT_TICK_RATE: u32 = 120;
