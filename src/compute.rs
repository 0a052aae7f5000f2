/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `EngineState` (plus the tick's timestamp and, where needed, an RNG handle)
/// and returns a brand-new `EngineState`. Side effects are limited to the
/// injected RNG.

use rand::Rng;
use tracing::debug;

use crate::constants::*;
use crate::entities::{
    Animation, ControlIntents, EngineState, Entity, Obstacle, ObstacleKind, Player, Projectile,
    Renderable, Tilt,
};
use crate::timer::{Cooldown, SpawnSchedule};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh state for a new game started at `now_ms`.
///
/// The fire cooldown counts as triggered at `now_ms`, so the first shot is
/// available one cooldown later. The first obstacle spawns on the first tick
/// after `now_ms`.
pub fn init_state(now_ms: u64) -> EngineState {
    EngineState {
        player: Player::default(),
        projectiles: Vec::new(),
        obstacles: Vec::new(),
        fire_cooldown: Cooldown::new(now_ms, FIRE_COOLDOWN_MS),
        spawn_schedule: SpawnSchedule::new(now_ms, SPAWN_WINDOW_MS),
        hearts: Animation::heart(),
        background_scroll: 0,
        frame: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Move the player one step for the held direction and set its tilt.
/// Up wins over down. A blocked direction leaves the sprite level.
pub fn steer_player(state: &EngineState, intents: &ControlIntents) -> EngineState {
    let p = &state.player;
    let (y, tilt) = if intents.up && p.y > PLAYER_MIN_Y {
        ((p.y - PLAYER_STEP).max(PLAYER_MIN_Y), Tilt::Climb)
    } else if intents.down && p.y < PLAYER_MAX_Y {
        ((p.y + PLAYER_STEP).min(PLAYER_MAX_Y), Tilt::Dive)
    } else {
        (p.y, Tilt::Level)
    };
    EngineState {
        player: Player {
            y,
            tilt,
            ..p.clone()
        },
        ..state.clone()
    }
}

/// Fire from the player's leading edge if the cooldown allows it.
pub fn player_fire(state: &EngineState, now_ms: u64) -> EngineState {
    let mut fire_cooldown = state.fire_cooldown.clone();
    if !fire_cooldown.try_trigger(now_ms) {
        return state.clone();
    }
    let p = &state.player;
    let projectile = Projectile::new(p.x + PLAYER_WIDTH, p.y + PLAYER_HEIGHT / 2);
    debug!(x = projectile.x, y = projectile.y, now_ms, "projectile fired");

    let mut projectiles = state.projectiles.clone();
    projectiles.push(projectile);
    EngineState {
        projectiles,
        fire_cooldown,
        ..state.clone()
    }
}

/// Spawn one obstacle at the right edge if the schedule has elapsed.
pub fn spawn_due_obstacle(state: &EngineState, now_ms: u64, rng: &mut impl Rng) -> EngineState {
    if !state.spawn_schedule.is_due(now_ms) {
        return state.clone();
    }
    let y = rng.gen_range(PLAYER_MIN_Y..=PLAYER_MAX_Y);
    let kind = ObstacleKind::random(rng);
    let mut spawn_schedule = state.spawn_schedule.clone();
    spawn_schedule.reschedule(now_ms, rng);
    debug!(y, ?kind, next_spawn_ms = spawn_schedule.next_spawn_ms(), "obstacle spawned");

    let mut obstacles = state.obstacles.clone();
    obstacles.push(Obstacle::new(WORLD_WIDTH, y, kind));
    EngineState {
        obstacles,
        spawn_schedule,
        ..state.clone()
    }
}

// ── Per-tick update (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick at time `now_ms`.
///
/// Order: steer, fire, spawn, move projectiles, move obstacles, projectile
/// hits, player hits, animations. Obstacles hit by a projectile are gone
/// before the player check, so one obstacle never both scores and damages.
pub fn tick(
    state: &EngineState,
    intents: &ControlIntents,
    now_ms: u64,
    rng: &mut impl Rng,
) -> EngineState {
    // ── 1–3. Input, firing, spawning ─────────────────────────────────────────
    let state = steer_player(state, intents);
    let state = if intents.fire {
        player_fire(&state, now_ms)
    } else {
        state
    };
    let state = spawn_due_obstacle(&state, now_ms, rng);

    // ── 4. Move projectiles ──────────────────────────────────────────────────
    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .map(|p| Projectile {
            x: p.x + PROJECTILE_SPEED,
            ..p.clone()
        })
        .filter(|p| p.x <= WORLD_WIDTH)
        .collect();

    // ── 5. Move and animate obstacles ────────────────────────────────────────
    let obstacles: Vec<Obstacle> = state
        .obstacles
        .iter()
        .map(|o| {
            let mut animation = o.animation.clone();
            animation.advance();
            Obstacle {
                x: o.x - OBSTACLE_SPEED,
                animation,
                ..o.clone()
            }
        })
        .filter(|o| o.x >= 0)
        .collect();

    // ── 6. Collision: projectiles ↔ obstacles ────────────────────────────────
    let (obstacles, projectiles, shot_down) = resolve_projectile_hits(obstacles, projectiles);

    // ── 7. Collision: obstacles ↔ player ─────────────────────────────────────
    let (obstacles, rammed) = resolve_player_hits(obstacles, &state.player);

    // ── 8. Player and HUD animation ──────────────────────────────────────────
    let mut animation = state.player.animation.clone();
    animation.advance();
    let mut hearts = state.hearts.clone();
    hearts.advance();

    let lives = state.player.lives.saturating_sub(rammed);
    if rammed > 0 {
        debug!(rammed, lives, "player hit by obstacle");
    }
    if shot_down > 0 {
        debug!(shot_down, "obstacles shot down");
    }

    let player = Player {
        lives,
        score: state.player.score + shot_down,
        animation,
        ..state.player.clone()
    };

    EngineState {
        player,
        projectiles,
        obstacles,
        hearts,
        background_scroll: (state.background_scroll + BACKGROUND_SCROLL_STEP) % WORLD_WIDTH,
        frame: state.frame + 1,
        ..state
    }
}

/// Remove every obstacle touched by a projectile along with every projectile
/// touching it. Returns the survivors and the number of obstacles destroyed.
pub fn resolve_projectile_hits(
    obstacles: Vec<Obstacle>,
    mut projectiles: Vec<Projectile>,
) -> (Vec<Obstacle>, Vec<Projectile>, u32) {
    let mut survivors = Vec::with_capacity(obstacles.len());
    let mut destroyed = 0;

    for obstacle in obstacles {
        let before = projectiles.len();
        projectiles.retain(|p| !obstacle.collides_with(p));
        if projectiles.len() < before {
            destroyed += 1;
        } else {
            survivors.push(obstacle);
        }
    }

    (survivors, projectiles, destroyed)
}

/// Remove every obstacle touching the player. Returns the survivors and the
/// number of obstacles that hit.
pub fn resolve_player_hits(obstacles: Vec<Obstacle>, player: &Player) -> (Vec<Obstacle>, u32) {
    let (hits, survivors): (Vec<Obstacle>, Vec<Obstacle>) =
        obstacles.into_iter().partition(|o| o.collides_with(player));
    (survivors, hits.len() as u32)
}

// ── Render view ──────────────────────────────────────────────────────────────

/// Every drawable entity: obstacles, then projectiles, then the player on top.
pub fn renderables(state: &EngineState) -> Vec<Renderable> {
    let mut out = Vec::with_capacity(state.obstacles.len() + state.projectiles.len() + 1);
    out.extend(state.obstacles.iter().map(|o| Renderable::of(o)));
    out.extend(state.projectiles.iter().map(|p| Renderable::of(p)));
    out.push(Renderable::of(&state.player));
    out
}
