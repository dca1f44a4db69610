use std::time::{Duration, Instant};

/// Caps the frame rate by sleeping out the rest of a fixed budget.
/// softbuffer presents without vsync, so this is the only limiter.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    /// A zero budget disables pacing
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    /// Time left in the budget after `elapsed`, never negative
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Runs one frame and paces it, whichever way the frame returns
    pub fn run<T>(&self, frame: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let out = frame();
        self.pace(started);
        out
    }

    /// Sleeps until the frame that began at `started` has used its budget.
    /// Returns the time the frame itself took.
    pub fn pace(&self, started: Instant) -> Duration {
        let elapsed = started.elapsed();
        if !self.budget.is_zero() && elapsed > self.budget * 2 {
            log::warn!(
                "frame took {:.1} ms, budget is {} ms",
                elapsed.as_secs_f32() * 1000.0,
                self.budget.as_millis()
            );
        }
        let rest = self.remaining(elapsed);
        if !rest.is_zero() {
            std::thread::sleep(rest);
        }
        elapsed
    }
}

/// Counts frames and logs the rate about once a second
pub struct FpsCounter {
    frame_counter: u32,
    last_fps_print: Instant,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            frame_counter: 0,
            last_fps_print: now,
        }
    }

    /// Returns the measured rate when a report is due
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frame_counter += 1;
        let secs = now.duration_since(self.last_fps_print).as_secs_f32();
        if secs < 1.0 {
            return None;
        }
        let fps = self.frame_counter as f32 / secs;
        log::debug!("FPS: {:.1}", fps);
        self.frame_counter = 0;
        self.last_fps_print = now;
        Some(fps)
    }
}
