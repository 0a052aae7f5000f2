/// Time-gating utilities: fire cooldown, obstacle spawn schedule, the
/// millisecond clock the simulation reads, and the frame limiter.
///
/// The simulation never calls `Instant::now()` itself; every timestamp it
/// sees comes through a `Clock`, so tests can drive time by hand.

use std::time::{Duration, Instant};

use rand::Rng;

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the clock was created.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

/// Gates a repeatable action so it happens at most once per `duration_ms`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cooldown {
    last_triggered_ms: u64,
    duration_ms: u64,
}

impl Cooldown {
    /// A cooldown that counts as having just fired at `started_ms`.
    pub fn new(started_ms: u64, duration_ms: u64) -> Self {
        Self {
            last_triggered_ms: started_ms,
            duration_ms,
        }
    }

    pub fn last_triggered_ms(&self) -> u64 {
        self.last_triggered_ms
    }

    /// True once at least `duration_ms` has passed since the last trigger.
    pub fn is_ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_triggered_ms) >= self.duration_ms
    }

    /// Triggers and returns true if ready; otherwise leaves the clock alone.
    pub fn try_trigger(&mut self, now_ms: u64) -> bool {
        if !self.is_ready(now_ms) {
            return false;
        }
        self.last_triggered_ms = now_ms;
        true
    }
}

// ── Spawn schedule ────────────────────────────────────────────────────────────

/// Next obstacle spawn time, redrawn uniformly after every spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnSchedule {
    next_spawn_ms: u64,
    window_ms: u64,
}

impl SpawnSchedule {
    pub fn new(next_spawn_ms: u64, window_ms: u64) -> Self {
        Self {
            next_spawn_ms,
            window_ms,
        }
    }

    /// A schedule that never fires. Handy for scripted scenarios.
    pub fn never() -> Self {
        Self::new(u64::MAX, 0)
    }

    pub fn next_spawn_ms(&self) -> u64 {
        self.next_spawn_ms
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms > self.next_spawn_ms
    }

    /// Pick the next spawn time in `now ..= now + window`.
    pub fn reschedule(&mut self, now_ms: u64, rng: &mut impl Rng) {
        let offset = rng.gen_range(0..=self.window_ms);
        self.next_spawn_ms = now_ms.saturating_add(offset);
    }
}

// ── Frame limiter ─────────────────────────────────────────────────────────────

/// Sleep-based limiter that holds each tick to a fixed duration.
#[derive(Clone, Debug)]
pub struct FrameLimiter {
    frame: Duration,
}

impl FrameLimiter {
    pub fn new(ticks_per_second: u32) -> Self {
        let tps = ticks_per_second.max(1) as u64;
        Self {
            frame: Duration::from_micros(1_000_000 / tps),
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Block until one frame has passed since `frame_start`.
    pub fn wait(&self, frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        } else {
            tracing::trace!(?elapsed, budget = ?self.frame, "tick overran frame budget");
        }
    }
}
