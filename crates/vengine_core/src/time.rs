//! Frame clock for a one-tick-per-frame loop.
//!
//! The simulation advances exactly once per rendered frame. After each present
//! the loop waits a fixed `frame_delay` before the next frame, so the achieved
//! rate is render cost plus the delay and is not adaptive. `ticks_ms()` is the
//! wall clock used by sprite animation, which runs on real time rather than on
//! tick count.

use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(16);

pub struct TimeState {
    pub frame_delay: Duration,
    pub frame_count: u64,
    pub real_dt: f64,
    start_instant: Instant,
    last_instant: Instant,
    next_frame_at: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self::with_frame_delay(DEFAULT_FRAME_DELAY)
    }

    pub fn with_frame_delay(frame_delay: Duration) -> Self {
        let now = Instant::now();
        let nominal_dt = frame_delay.as_secs_f64().max(1.0 / 1000.0);
        Self {
            frame_delay,
            frame_count: 0,
            real_dt: 0.0,
            start_instant: now,
            last_instant: now,
            next_frame_at: now,
            fps_samples: [nominal_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 1.0 / nominal_dt,
            smoothed_frame_time_ms: nominal_dt * 1000.0,
        }
    }

    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    pub fn begin_frame_at(&mut self, now: Instant) {
        self.real_dt = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    /// Schedule the next frame `frame_delay` after the present that just finished.
    pub fn end_frame(&mut self) {
        self.end_frame_at(Instant::now());
    }

    pub fn end_frame_at(&mut self, presented_at: Instant) {
        self.next_frame_at = presented_at + self.frame_delay;
    }

    pub fn next_frame_at(&self) -> Instant {
        self.next_frame_at
    }

    pub fn should_render(&self, now: Instant) -> bool {
        now >= self.next_frame_at
    }

    /// Milliseconds since the clock was created.
    pub fn ticks_ms(&self) -> u64 {
        self.ticks_ms_at(Instant::now())
    }

    pub fn ticks_ms_at(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start_instant).as_millis() as u64
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}
