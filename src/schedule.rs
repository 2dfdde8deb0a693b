//! Frame scheduling.
//!
//! A [`FrameScheduler`] is the "run before the next repaint" primitive. The
//! render loop asks it once per frame and renders when it returns `true`.

use std::thread;
use std::time::{Duration, Instant};

/// Blocks until the next frame should be rendered.
pub trait FrameScheduler {
    /// Wait for the next frame signal. Returns `false` when no further
    /// frames will come.
    fn wait_for_frame(&mut self) -> bool;
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Box<S> {
    fn wait_for_frame(&mut self) -> bool {
        (**self).wait_for_frame()
    }
}

/// Paces frames to a fixed interval by sleeping off the remainder.
///
/// Missed deadlines are not caught up: the next frame is scheduled one
/// interval after the late one.
#[derive(Debug)]
pub struct FixedRate {
    interval: Duration,
    next: Option<Instant>,
}

impl FixedRate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    /// Pace to `fps` frames per second. Non-positive rates, and rates so low
    /// the interval overflows a `Duration`, do not wait.
    pub fn from_fps(fps: f32) -> Self {
        let interval = if fps.is_finite() && fps > 0.0 {
            Duration::try_from_secs_f32(1.0 / fps).unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        };
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedRate {
    fn default() -> Self {
        Self::from_fps(60.0)
    }
}

impl FrameScheduler for FixedRate {
    fn wait_for_frame(&mut self) -> bool {
        let now = Instant::now();
        if let Some(next) = self.next {
            if next > now {
                thread::sleep(next - now);
            }
        }
        self.next = Some(Instant::now() + self.interval);
        true
    }
}

/// Never waits. For headless rendering and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl FrameScheduler for Immediate {
    fn wait_for_frame(&mut self) -> bool {
        true
    }
}

/// Ends the loop after a fixed number of frames from the inner scheduler.
#[derive(Debug)]
pub struct FrameLimit<S> {
    inner: S,
    remaining: u64,
}

impl<S: FrameScheduler> FrameLimit<S> {
    pub fn new(inner: S, frames: u64) -> Self {
        Self {
            inner,
            remaining: frames,
        }
    }

    /// Frames still allowed.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl<S: FrameScheduler> FrameScheduler for FrameLimit<S> {
    fn wait_for_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        if !self.inner.wait_for_frame() {
            self.remaining = 0;
            return false;
        }
        self.remaining -= 1;
        true
    }
}
