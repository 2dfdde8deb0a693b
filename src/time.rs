//! Frame timing for the render loop.
//!
//! The physics is frame-based (one `step` per frame, no delta time), so the
//! clock only counts frames, measures the interval between them and keeps a
//! smoothed FPS figure for logging.

use std::time::{Duration, Instant};

/// Frame counter and rate meter.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame was ticked.
    last_frame: Instant,
    /// Interval between the last two ticks.
    delta: Duration,
    /// Total frames ticked.
    frame_count: u64,
    /// FPS measured over the last completed window.
    fps: f32,
    /// Frame count at the start of the current window.
    window_frames: u64,
    /// Start of the current window.
    window_start: Instant,
    /// Window length.
    window: Duration,
}

impl FrameClock {
    /// Create a clock that recomputes FPS every half second.
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(500))
    }

    /// Create a clock that recomputes FPS every `window`.
    pub fn with_window(window: Duration) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            window_frames: 0,
            window_start: now,
            window,
        }
    }

    /// Record a finished frame.
    ///
    /// Returns `Some(fps)` when a measurement window closed on this tick.
    pub fn tick(&mut self) -> Option<f32> {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let window_elapsed = now.duration_since(self.window_start);
        if window_elapsed >= self.window && !window_elapsed.is_zero() {
            let frames = self.frame_count - self.window_frames;
            self.fps = frames as f32 / window_elapsed.as_secs_f32();
            self.window_frames = self.frame_count;
            self.window_start = now;
            Some(self.fps)
        } else {
            None
        }
    }

    /// Frames ticked so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Last measured frames per second (0 until the first window closes).
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Interval between the two most recent ticks.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Time since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// When the last frame was ticked.
    #[inline]
    pub fn last_frame(&self) -> Instant {
        self.last_frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
