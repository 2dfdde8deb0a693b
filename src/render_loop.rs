//! The render loop driver.
//!
//! [`RenderLoop`] owns the shared field, the output surface and a frame
//! scheduler. Each frame it clears the surface, steps the field, draws the
//! particles and runs the connection pass, all under one lock so pointer and
//! resize handlers land strictly between frames.
//!
//! The loop runs until its [`StopHandle`] is triggered or the scheduler runs
//! out of frames. Tests can skip the scheduler entirely and call
//! [`RenderLoop::frame`] by hand.
//!
//! ```ignore
//! let field = ParticleField::new(800.0, 600.0, 100);
//! let mut render_loop = RenderLoop::new(field, Canvas::new(800, 600, bg), FixedRate::default());
//!
//! let stop = render_loop.stop_handle();
//! let events = render_loop.field_handle();
//! // hand `stop` and `events` to the host, then:
//! render_loop.run()?;
//! ```

use crate::error::LoopError;
use crate::field::ParticleField;
use crate::input::FieldHandle;
use crate::schedule::FrameScheduler;
use crate::surface::Surface;
use crate::time::FrameClock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Cancels a running [`RenderLoop`] at its next frame boundary.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// What one frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// 1-based index of this frame.
    pub frame: u64,
    /// Particles drawn.
    pub particles: usize,
    /// Connection segments drawn.
    pub connections: usize,
}

/// Drives a [`ParticleField`] onto a [`Surface`] once per frame signal.
pub struct RenderLoop<S, F> {
    field: Arc<Mutex<ParticleField>>,
    surface: S,
    scheduler: F,
    stop: StopHandle,
    clock: FrameClock,
}

impl<S: Surface, F: FrameScheduler> RenderLoop<S, F> {
    pub fn new(field: ParticleField, surface: S, scheduler: F) -> Self {
        Self {
            field: Arc::new(Mutex::new(field)),
            surface,
            scheduler,
            stop: StopHandle::new(),
            clock: FrameClock::new(),
        }
    }

    /// Handle for delivering host events to the field.
    pub fn field_handle(&self) -> FieldHandle {
        FieldHandle::new(Arc::clone(&self.field))
    }

    /// Handle for stopping [`run`](Self::run).
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.clock.frame()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Render one frame: clear, step, draw particles, draw connections.
    pub fn frame(&mut self) -> Result<FrameStats, LoopError> {
        let (particles, connections) = {
            let mut field = self.field.lock()?;
            self.surface.clear();
            field.step();
            field.draw(&mut self.surface);
            let connections = field.draw_connections(&mut self.surface);
            (field.len(), connections)
        };

        if let Some(fps) = self.clock.tick() {
            log::debug!(
                "frame {}: {:.1} fps, {} connections",
                self.clock.frame(),
                fps,
                connections
            );
        }

        Ok(FrameStats {
            frame: self.clock.frame(),
            particles,
            connections,
        })
    }

    /// Render frames until stopped or the scheduler is exhausted.
    ///
    /// Returns the number of frames rendered by this call.
    pub fn run(&mut self) -> Result<u64, LoopError> {
        let started = self.clock.frame();
        log::info!("Render loop started");

        while !self.stop.is_stopped() {
            if !self.scheduler.wait_for_frame() {
                break;
            }
            // A stop issued while waiting cancels the pending frame.
            if self.stop.is_stopped() {
                break;
            }
            self.frame()?;
        }

        let rendered = self.clock.frame() - started;
        log::info!("Render loop stopped after {} frames", rendered);
        Ok(rendered)
    }

    /// Tear down, returning the field and surface.
    pub fn into_parts(self) -> (Arc<Mutex<ParticleField>>, S) {
        (self.field, self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::particle::Particle;
    use crate::schedule::{FrameLimit, Immediate};
    use crate::surface::{DrawCommand, Recorder};
    use crate::visuals::ColorCategory;
    use glam::Vec2;

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0, ColorCategory::Ambient)
    }

    fn two_close() -> ParticleField {
        ParticleField::from_particles(
            800.0,
            600.0,
            vec![still(100.0, 100.0), still(130.0, 140.0)],
            FieldConfig::default(),
        )
    }

    #[test]
    fn test_frame_order() {
        let mut render_loop = RenderLoop::new(two_close(), Recorder::new(), Immediate);
        let stats = render_loop.frame().unwrap();

        assert_eq!(
            stats,
            FrameStats {
                frame: 1,
                particles: 2,
                connections: 1
            }
        );

        let commands = render_loop.surface().commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::Disc { .. }));
        assert!(matches!(commands[2], DrawCommand::Disc { .. }));
        assert!(matches!(commands[3], DrawCommand::Line { .. }));
        assert_eq!(commands.len(), 4);
    }

    #[test]
    fn test_run_until_frame_limit() {
        let mut render_loop =
            RenderLoop::new(two_close(), Recorder::new(), FrameLimit::new(Immediate, 5));
        assert_eq!(render_loop.run().unwrap(), 5);
        assert_eq!(render_loop.frames(), 5);
    }

    #[test]
    fn test_stop_before_run() {
        let mut render_loop = RenderLoop::new(two_close(), Recorder::new(), Immediate);
        render_loop.stop_handle().stop();
        assert_eq!(render_loop.run().unwrap(), 0);
    }

    /// Scheduler that stops the loop after a number of frame signals.
    struct StopAfter {
        stop: StopHandle,
        signals: u32,
    }

    impl FrameScheduler for StopAfter {
        fn wait_for_frame(&mut self) -> bool {
            if self.signals == 0 {
                self.stop.stop();
            } else {
                self.signals -= 1;
            }
            true
        }
    }

    #[test]
    fn test_stop_handle_ends_infinite_loop() {
        let stop = StopHandle::new();
        let scheduler = StopAfter {
            stop: stop.clone(),
            signals: 3,
        };
        let mut render_loop = RenderLoop::new(two_close(), Recorder::new(), scheduler);
        render_loop.stop = stop;

        assert_eq!(render_loop.run().unwrap(), 3);
    }

    #[test]
    fn test_events_between_frames() {
        let mut render_loop = RenderLoop::new(two_close(), Recorder::new(), Immediate);
        let events = render_loop.field_handle();

        events.resized(50.0, 50.0).unwrap();
        events.pointer_moved(100.0, 100.0).unwrap();
        render_loop.frame().unwrap();

        let (field, _) = render_loop.into_parts();
        let field = field.lock().unwrap();
        assert_eq!(field.width(), 50.0);
        // The particle at the pointer is untouched, the other is pulled in.
        assert_eq!(field.particles()[0].position, Vec2::new(100.0, 100.0));
        assert!(field.particles()[1].position.distance(Vec2::new(100.0, 100.0)) < 50.0);
    }
}
