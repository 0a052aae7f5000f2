use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use side_scroller::config::Config;
use side_scroller::display::{self, Viewport};
use side_scroller::entities::GameStatus;
use side_scroller::error::GameError;
use side_scroller::game::Game;
use side_scroller::input::KeyTracker;
use side_scroller::timer::{Clock, FrameLimiter, MonotonicClock};

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One tick = drain input, step the game, draw, wait for the next tick.
/// Quit is honoured only after the tick that saw it has been drawn.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    release_events: bool,
) -> Result<u32, GameError> {
    let clock = MonotonicClock::new();
    let limiter = FrameLimiter::new(config.tick_rate);
    info!(frame = ?limiter.frame(), release_events, "entering game loop");
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (width, height) = terminal::size()?;
    let mut view = Viewport::new(width, height)?;
    let mut keys = KeyTracker::new(release_events);
    let mut game = Game::new(clock.now_ms());

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.now_ms();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(w, h) = ev {
                view = Viewport::new(w, h)?;
            }
            keys.handle(&ev, now_ms);
        }

        let intents = keys.intents(game.status(), now_ms);
        let status = game.step(&intents, now_ms, &mut rng);

        display::render(out, &game, &view)?;

        if status == GameStatus::Terminated {
            return Ok(game.score());
        }

        limiter.wait(frame_start);
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Raw mode, alternate screen, hidden cursor and (when supported) key-release
/// reporting. Everything is undone on drop, including when setup fails
/// halfway or the game loop returns an error.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter<W: Write>(out: &mut W) -> Result<Self, GameError> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            keyboard_enhanced: false,
        };
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Kitty-protocol terminals report key releases; others keep the
        // timed hold window.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            out.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            guard.keyboard_enhanced = true;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so log lines go to
/// a file instead.
fn init_tracing(config: &Config) -> Result<(), GameError> {
    let file = File::create(&config.log_file)?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(GameError::Config)?;
    init_tracing(&config)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    info!(
        tick_rate = config.tick_rate,
        seed = ?config.seed,
        "starting side scroller"
    );

    let mut out = BufWriter::new(stdout());
    let guard = TerminalGuard::enter(&mut out)?;
    info!(keyboard_enhanced = guard.keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, guard.keyboard_enhanced);
    let _ = out.flush();
    drop(guard);

    let score = result?;
    info!(score, "side scroller exited");
    Ok(())
}
