//! Host events for the particle field.
//!
//! Pointer and resize handlers run between frames. They reach the field
//! through a [`FieldHandle`], which takes the same lock the render loop holds
//! for a whole frame, so a handler never observes or produces a half-stepped
//! field.
//!
//! # Usage
//!
//! ```ignore
//! let handle = render_loop.field_handle();
//!
//! // From the host's event callbacks:
//! handle.pointer_moved(x, y)?;
//! handle.pointer_left()?;
//! handle.resized(width, height)?;
//! ```

use crate::error::LoopError;
use crate::field::ParticleField;
use std::sync::{Arc, Mutex};

/// An event delivered by the hosting environment, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The pointer moved to `(x, y)`.
    PointerMoved { x: f32, y: f32 },
    /// The pointer left the tracked surface.
    PointerLeft,
    /// The surface changed size. Only the field's viewport is updated; the
    /// host resizes its own surface.
    Resized { width: f32, height: f32 },
}

impl HostEvent {
    /// Apply the event to a field.
    pub fn apply(self, field: &mut ParticleField) {
        match self {
            HostEvent::PointerMoved { x, y } => field.set_pointer(x, y),
            HostEvent::PointerLeft => field.clear_pointer(),
            HostEvent::Resized { width, height } => field.resize(width, height),
        }
    }
}

/// Shared, serialized access to a [`ParticleField`].
#[derive(Debug, Clone)]
pub struct FieldHandle {
    field: Arc<Mutex<ParticleField>>,
}

impl FieldHandle {
    pub(crate) fn new(field: Arc<Mutex<ParticleField>>) -> Self {
        Self { field }
    }

    /// Apply a host event synchronously.
    pub fn apply(&self, event: HostEvent) -> Result<(), LoopError> {
        self.with_field(|field| event.apply(field))
    }

    /// The pointer moved to `(x, y)`.
    pub fn pointer_moved(&self, x: f32, y: f32) -> Result<(), LoopError> {
        self.apply(HostEvent::PointerMoved { x, y })
    }

    /// The pointer left the surface.
    pub fn pointer_left(&self) -> Result<(), LoopError> {
        self.apply(HostEvent::PointerLeft)
    }

    /// The surface was resized. Takes effect before the next step.
    ///
    /// The surface itself is the host's to resize, e.g.
    /// `render_loop.surface_mut().resize(w, h)` for a [`Canvas`](crate::Canvas).
    pub fn resized(&self, width: f32, height: f32) -> Result<(), LoopError> {
        self.apply(HostEvent::Resized { width, height })
    }

    /// Run `f` with exclusive access to the field.
    pub fn with_field<R>(&self, f: impl FnOnce(&mut ParticleField) -> R) -> Result<R, LoopError> {
        let mut field = self.field.lock()?;
        Ok(f(&mut field))
    }
}
