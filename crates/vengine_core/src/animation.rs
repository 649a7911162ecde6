//! Wall-clock driven sprite frame cycling.
//!
//! A `FrameCycle` walks a fixed number of sprite-sheet columns in a loop. It is
//! advanced once per simulation tick with the current wall clock in
//! milliseconds, and moves to the next frame only once more than `frame_ms` has
//! elapsed since the last advance. Physics runs on ticks; animation runs on real
//! time, so a slow frame rate does not slow the walk cycle.

pub const DEFAULT_TOTAL_FRAMES: u32 = 4;
pub const DEFAULT_FRAME_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCycle {
    pub current_frame: u32,
    pub last_frame_ms: u64,
    pub total_frames: u32,
    pub frame_ms: u64,
}

impl FrameCycle {
    pub fn new(total_frames: u32, frame_ms: u64) -> Self {
        Self {
            current_frame: 0,
            last_frame_ms: 0,
            total_frames: total_frames.max(1),
            frame_ms,
        }
    }

    /// Advance at most one frame. Returns true when the frame changed.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if now_ms > self.last_frame_ms + self.frame_ms {
            self.last_frame_ms = now_ms;
            self.current_frame = (self.current_frame + 1) % self.total_frames;
            true
        } else {
            false
        }
    }

    /// Back to the first frame, timed from `now_ms`.
    pub fn reset(&mut self, now_ms: u64) {
        self.current_frame = 0;
        self.last_frame_ms = now_ms;
    }
}

impl Default for FrameCycle {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_FRAMES, DEFAULT_FRAME_MS)
    }
}
