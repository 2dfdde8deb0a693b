//! # plexus
//!
//! A drifting particle field with pointer attraction and faint lines between
//! nearby particles, the classic "plexus" page background.
//!
//! The crate is the animation core only. The host supplies a drawing
//! surface, a frame signal and pointer/resize events; plexus owns the
//! particle state and decides what to draw each frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::prelude::*;
//!
//! let config = FieldConfig::default();
//! let field = ParticleField::with_config(800.0, 600.0, &config);
//! let canvas = Canvas::new(800, 600, config.palette.background);
//!
//! let mut render_loop = RenderLoop::new(field, canvas, FrameLimit::new(Immediate, 120));
//! render_loop.field_handle().pointer_moved(400.0, 300.0)?;
//! render_loop.run()?;
//! render_loop.surface().save_png("frame.png")?;
//! ```
//!
//! ## Per-frame behavior
//!
//! 1. The surface is cleared.
//! 2. Every particle moves by its velocity and reflects its velocity off
//!    the viewport edges (position is never clamped).
//! 3. If the pointer is present and within the attraction radius (200), the
//!    particle is nudged toward it. The nudge moves position directly and
//!    fades linearly to zero at the radius.
//! 4. Particles are drawn as discs in their palette color.
//! 5. Every pair closer than the connection threshold (150) is linked with a
//!    line whose opacity falls from 0.1 to 0 over that distance.
//!
//! ## Threading
//!
//! The field sits behind one mutex. A frame holds it from clear to the last
//! connection, and every [`FieldHandle`] call takes it too, so events are
//! applied strictly between frames even when they arrive from another
//! thread.

pub mod canvas;
pub mod config;
pub mod connections;
pub mod error;
pub mod field;
pub mod input;
pub mod particle;
mod render_loop;
pub mod schedule;
mod spawn;
pub mod surface;
pub mod time;
pub mod visuals;

pub use canvas::Canvas;
pub use config::FieldConfig;
pub use connections::{connection_alpha, connections, Connection};
pub use error::{ConfigError, LoopError, SnapshotError};
pub use field::ParticleField;
pub use glam::Vec2;
pub use input::{FieldHandle, HostEvent};
pub use particle::Particle;
pub use render_loop::{FrameStats, RenderLoop, StopHandle};
pub use schedule::{FixedRate, FrameLimit, FrameScheduler, Immediate};
pub use spawn::Spawner;
pub use surface::{DrawCommand, Recorder, Surface};
pub use time::FrameClock;
pub use visuals::{Color, ColorCategory, Palette};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use plexus::prelude::*;
/// ```
///
/// This imports:
/// - [`ParticleField`] and [`FieldConfig`] - the field and its tunables
/// - [`RenderLoop`], [`StopHandle`], [`FieldHandle`] - the loop and its handles
/// - [`Surface`], [`Canvas`], [`Recorder`] - drawing targets
/// - [`FixedRate`], [`FrameLimit`], [`Immediate`] - frame schedulers
/// - [`Color`], [`Palette`] - render colors
/// - [`Vec2`] - glam vector type
pub mod prelude {
    pub use crate::canvas::Canvas;
    pub use crate::config::FieldConfig;
    pub use crate::field::ParticleField;
    pub use crate::input::{FieldHandle, HostEvent};
    pub use crate::particle::Particle;
    pub use crate::render_loop::{RenderLoop, StopHandle};
    pub use crate::schedule::{FixedRate, FrameLimit, FrameScheduler, Immediate};
    pub use crate::surface::{Recorder, Surface};
    pub use crate::visuals::{Color, ColorCategory, Palette};
    pub use crate::Vec2;
}
