//! The particle field.
//!
//! A [`ParticleField`] owns a fixed number of particles together with the
//! viewport size and the last known pointer position. It has no global
//! state: the render loop holds it and event handlers reach it through a
//! [`FieldHandle`](crate::FieldHandle).
//!
//! # Example
//!
//! ```ignore
//! let mut field = ParticleField::new(800.0, 600.0, 100);
//! let mut surface = Recorder::new();
//!
//! field.set_pointer(400.0, 300.0);
//! field.step();
//! field.draw(&mut surface);
//! ```

use crate::config::FieldConfig;
use crate::connections::draw_connections;
use crate::particle::Particle;
use crate::spawn::Spawner;
use crate::surface::Surface;
use crate::visuals::ColorCategory;
use glam::Vec2;

/// Particles plus the viewport and pointer context they move in.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    pointer: Option<Vec2>,
    config: FieldConfig,
}

impl ParticleField {
    /// Spawn `count` particles over a `width` x `height` viewport with
    /// default tunables.
    pub fn new(width: f32, height: f32, count: usize) -> Self {
        Self::with_config(width, height, &FieldConfig::default().with_particle_count(count))
    }

    /// Spawn `config.particle_count` particles.
    pub fn with_config(width: f32, height: f32, config: &FieldConfig) -> Self {
        let mut spawner = Spawner::new(config);
        Self::with_spawner(width, height, config, &mut spawner)
    }

    /// Spawn `config.particle_count` particles from a caller-owned spawner.
    pub fn with_spawner(
        width: f32,
        height: f32,
        config: &FieldConfig,
        spawner: &mut Spawner,
    ) -> Self {
        let particles = spawner.spawn_many(config.particle_count, width, height);
        log::debug!(
            "Spawned {} particles over {}x{}",
            particles.len(),
            width,
            height
        );
        Self::from_particles(width, height, particles, config.clone())
    }

    /// Build a field from explicit particles.
    pub fn from_particles(
        width: f32,
        height: f32,
        particles: Vec<Particle>,
        config: FieldConfig,
    ) -> Self {
        Self {
            particles,
            width,
            height,
            pointer: None,
            config,
        }
    }

    // ========== Physics ==========

    /// Advance every particle by one frame.
    ///
    /// Each particle integrates its velocity, reflects off the viewport
    /// edges, then gets nudged toward the pointer if one is present and
    /// within the attraction radius.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        let radius = self.config.attraction_radius;
        let strength = self.config.attraction_strength;

        for p in &mut self.particles {
            p.advance(width, height);
            if let Some(pointer) = self.pointer {
                p.attract_to(pointer, radius, strength);
            }
        }
    }

    // ========== Rendering ==========

    /// Paint every particle as a filled disc in its category color.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            surface.fill_disc(p.position, p.radius, self.config.palette.color_for(p.category));
        }
    }

    /// Run the connection pass onto `surface`. Returns the number of links.
    pub fn draw_connections<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        draw_connections(&self.particles, &self.config, surface)
    }

    // ========== Host context ==========

    /// Record the pointer position in surface coordinates.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        let pointer = Vec2::new(x, y);
        // A non-finite position would poison every particle it attracts.
        self.pointer = pointer.is_finite().then_some(pointer);
    }

    /// Forget the pointer (it left the surface).
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Adopt a new viewport size. Particles are not moved.
    pub fn resize(&mut self, width: f32, height: f32) {
        log::trace!("Field resized {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
    }

    // ========== Accessors ==========

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of accent particles.
    pub fn accent_count(&self) -> usize {
        self.particles
            .iter()
            .filter(|p| p.category == ColorCategory::Accent)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};
    use crate::visuals::{Color, Palette};

    fn field_of(particles: Vec<Particle>) -> ParticleField {
        ParticleField::from_particles(800.0, 600.0, particles, FieldConfig::default())
    }

    fn moving(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), 1.5, ColorCategory::Ambient)
    }

    #[test]
    fn test_new_spawns_count() {
        let field = ParticleField::new(800.0, 600.0, 25);
        assert_eq!(field.len(), 25);
        assert_eq!(field.pointer(), None);
    }

    #[test]
    fn test_empty_field_is_harmless() {
        let mut field = ParticleField::new(800.0, 600.0, 0);
        assert!(field.is_empty());
        field.set_pointer(10.0, 10.0);
        field.step();

        let mut rec = Recorder::new();
        field.draw(&mut rec);
        assert_eq!(field.draw_connections(&mut rec), 0);
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn test_step_without_pointer_integrates() {
        let mut field = field_of(vec![
            moving(100.0, 100.0, 0.25, -0.125),
            moving(5.0, 5.0, -0.25, 0.25),
        ]);
        let before: Vec<_> = field.particles().to_vec();
        field.step();

        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(new.position, old.position + old.velocity);
        }
    }

    #[test]
    fn test_pointer_attraction_within_radius() {
        let mut field = field_of(vec![moving(100.0, 100.0, 0.0, 0.0)]);
        field.set_pointer(200.0, 100.0);
        field.step();

        let p = field.particles()[0];
        assert!((p.position.x - 100.5).abs() < 1e-5);
        assert_eq!(p.position.y, 100.0);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_left_stops_attraction() {
        let mut field = field_of(vec![moving(100.0, 100.0, 0.0, 0.0)]);
        field.set_pointer(150.0, 100.0);
        field.clear_pointer();
        field.step();
        assert_eq!(field.particles()[0].position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_non_finite_pointer_ignored() {
        let mut field = field_of(vec![moving(100.0, 100.0, 0.0, 0.0)]);
        field.set_pointer(f32::NAN, 0.0);
        assert_eq!(field.pointer(), None);
        field.step();
        assert!(field.particles()[0].position.is_finite());
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut field = field_of(vec![moving(700.0, 500.0, 0.25, 0.25)]);
        field.resize(400.0, 300.0);
        assert_eq!(field.width(), 400.0);
        assert_eq!(field.height(), 300.0);
        assert_eq!(field.particles()[0].position, Vec2::new(700.0, 500.0));

        field.step();
        assert_eq!(field.particles()[0].velocity, Vec2::new(-0.25, -0.25));
    }

    #[test]
    fn test_draw_uses_palette() {
        let field = field_of(vec![
            Particle::new(Vec2::new(1.0, 2.0), Vec2::ZERO, 2.5, ColorCategory::Accent),
            Particle::new(Vec2::new(3.0, 4.0), Vec2::ZERO, 1.0, ColorCategory::Ambient),
        ]);
        let palette = field.config().palette;
        let mut rec = Recorder::new();
        field.draw(&mut rec);

        assert_eq!(
            rec.commands(),
            &[
                DrawCommand::Disc {
                    center: Vec2::new(1.0, 2.0),
                    radius: 2.5,
                    color: palette.accent,
                },
                DrawCommand::Disc {
                    center: Vec2::new(3.0, 4.0),
                    radius: 1.0,
                    color: palette.ambient,
                },
            ]
        );

        // Drawing never mutates.
        let before = field.particles().to_vec();
        field.draw(&mut rec);
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn test_builder_tunables_reach_the_field() {
        let palette = Palette {
            accent: Color::rgb(1.0, 0.0, 0.0),
            connection: Color::rgb(0.0, 0.0, 1.0),
            ..Palette::default()
        };
        let config = FieldConfig::default()
            .with_attraction_radius(50.0)
            .with_connection_threshold(20.0)
            .with_palette(palette);
        let mut field = ParticleField::from_particles(
            800.0,
            600.0,
            vec![
                Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 2.0, ColorCategory::Accent),
                Particle::new(Vec2::new(115.0, 100.0), Vec2::ZERO, 2.0, ColorCategory::Ambient),
                Particle::new(Vec2::new(140.0, 100.0), Vec2::ZERO, 2.0, ColorCategory::Ambient),
                Particle::new(Vec2::new(400.0, 400.0), Vec2::ZERO, 2.0, ColorCategory::Ambient),
            ],
            config,
        );

        // The third particle is exactly 50px from the pointer, so only the
        // first two are pulled.
        field.set_pointer(100.0, 130.0);
        field.step();
        let ps = field.particles();
        assert!(ps[0].position.y > 100.0);
        assert!(ps[1].position.y > 100.0);
        assert_eq!(ps[2].position, Vec2::new(140.0, 100.0));
        assert_eq!(ps[3].position, Vec2::new(400.0, 400.0));

        let mut rec = Recorder::new();
        field.draw(&mut rec);
        let first = rec.discs().next().unwrap();
        assert_eq!(
            first,
            &DrawCommand::Disc {
                center: ps[0].position,
                radius: 2.0,
                color: palette.accent,
            }
        );

        // Roughly 15px and 25px apart: only the first pair is under 20px.
        let mut rec = Recorder::new();
        assert_eq!(field.draw_connections(&mut rec), 1);
        match rec.lines().next().unwrap() {
            DrawCommand::Line { color, .. } => {
                assert_eq!((color.r, color.g, color.b), (0.0, 0.0, 1.0))
            }
            other => panic!("expected a line, got {:?}", other),
        };
    }
}
