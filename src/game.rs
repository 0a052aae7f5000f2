/// Top-level state machine: one dispatch over `GameStatus` per tick.
///
/// ```text
/// Playing ──lives == 0──▶ GameOver ──restart──▶ Playing
///    │                       │
///    └────────quit───────────┴──────▶ Terminated
/// ```

use rand::Rng;
use tracing::info;

use crate::compute::{init_state, renderables, tick};
use crate::entities::{ControlIntents, EngineState, GameStatus, Renderable};

#[derive(Clone, Debug)]
pub struct Game {
    engine: EngineState,
    status: GameStatus,
}

impl Game {
    /// Start playing at `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self::from_engine(init_state(now_ms))
    }

    /// Resume from an existing engine state. The status follows the
    /// player's lives.
    pub fn from_engine(engine: EngineState) -> Self {
        let status = if engine.player.is_alive() {
            GameStatus::Playing
        } else {
            GameStatus::GameOver
        };
        Self { engine, status }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn engine(&self) -> &EngineState {
        &self.engine
    }

    pub fn lives(&self) -> u32 {
        self.engine.player.lives
    }

    pub fn score(&self) -> u32 {
        self.engine.player.score
    }

    pub fn renderables(&self) -> Vec<Renderable> {
        renderables(&self.engine)
    }

    /// Run one tick: apply `intents` for the current status, then honour
    /// quit. Returns the status after the tick.
    pub fn step(&mut self, intents: &ControlIntents, now_ms: u64, rng: &mut impl Rng) -> GameStatus {
        match self.status {
            GameStatus::Playing => {
                self.engine = tick(&self.engine, intents, now_ms, rng);
                if !self.engine.player.is_alive() {
                    self.status = GameStatus::GameOver;
                    info!(score = self.score(), frame = self.engine.frame, "game over");
                }
            }
            GameStatus::GameOver => {
                if intents.restart {
                    self.restart(now_ms);
                }
            }
            GameStatus::Terminated => {}
        }

        if intents.quit {
            self.quit();
        }
        self.status
    }

    /// Throw away every entity and start over with a fresh player.
    /// Ignored once terminated.
    pub fn restart(&mut self, now_ms: u64) {
        if self.status == GameStatus::Terminated {
            return;
        }
        self.engine = init_state(now_ms);
        self.status = GameStatus::Playing;
        info!(now_ms, "game restarted");
    }

    /// Move to `Terminated`. Returns false if already there.
    pub fn quit(&mut self) -> bool {
        if self.status == GameStatus::Terminated {
            return false;
        }
        info!(from = ?self.status, score = self.score(), "game terminated");
        self.status = GameStatus::Terminated;
        true
    }

    pub fn is_terminated(&self) -> bool {
        self.status == GameStatus::Terminated
    }
}
