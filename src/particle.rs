//! The particle record.

use crate::visuals::ColorCategory;
use glam::Vec2;

/// A single animated point.
///
/// Plain data: the field owns a `Vec<Particle>` and mutates it in place
/// every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface coordinates. Not clamped to the viewport.
    pub position: Vec2,
    /// Per-frame displacement. Reflection flips its sign; nothing rescales it.
    pub velocity: Vec2,
    /// Disc radius, fixed at creation.
    pub radius: f32,
    /// Palette entry, fixed at creation.
    pub category: ColorCategory,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, category: ColorCategory) -> Self {
        Self {
            position,
            velocity,
            radius,
            category,
        }
    }

    /// Integrate one frame and reflect velocity off the viewport edges.
    ///
    /// Reflection is one-sided: the position is left wherever integration put
    /// it, so a particle can sit past an edge for a frame (or longer after the
    /// viewport shrinks).
    #[inline]
    pub fn advance(&mut self, width: f32, height: f32) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Nudge the position toward `target` if it lies within `radius`.
    ///
    /// The nudge is `direction * (1 - distance / radius) * strength` and is
    /// applied to position, not velocity. A target exactly on the particle has
    /// no direction and leaves it untouched.
    #[inline]
    pub fn attract_to(&mut self, target: Vec2, radius: f32, strength: f32) {
        let delta = target - self.position;
        let distance = delta.length();

        if distance < radius && distance > 0.0 {
            let falloff = 1.0 - distance / radius;
            self.position += (delta / distance) * falloff * strength;
        }
    }
}
