//! Random particle initialization.
//!
//! [`Spawner`] wraps a seeded RNG and draws particles with the distributions
//! a [`FieldConfig`] describes.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::visuals::ColorCategory;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Draws particles uniformly over a viewport.
pub struct Spawner {
    rng: SmallRng,
    max_speed: f32,
    min_radius: f32,
    max_radius: f32,
    accent_probability: f64,
}

impl Spawner {
    /// Create a spawner from config, seeded from `config.seed` or the clock.
    pub fn new(config: &FieldConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    /// Create a spawner that draws from an existing RNG.
    pub fn with_rng(config: &FieldConfig, rng: SmallRng) -> Self {
        Self {
            rng,
            max_speed: config.max_initial_speed,
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            accent_probability: if config.accent_probability.is_nan() {
                0.0
            } else {
                config.accent_probability.clamp(0.0, 1.0)
            },
        }
    }

    /// Draw one particle inside `[0, width) x [0, height)`.
    pub fn spawn(&mut self, width: f32, height: f32) -> Particle {
        let position = Vec2::new(self.coordinate(width), self.coordinate(height));
        let velocity = Vec2::new(self.speed(), self.speed());
        // An unvalidated config can carry an infinite or empty range.
        let radius = if self.max_radius.is_finite() && self.min_radius < self.max_radius {
            self.rng.gen_range(self.min_radius..self.max_radius)
        } else {
            self.min_radius
        };
        let category = if self.rng.gen_bool(self.accent_probability) {
            ColorCategory::Accent
        } else {
            ColorCategory::Ambient
        };

        Particle::new(position, velocity, radius, category)
    }

    /// Draw `count` particles.
    pub fn spawn_many(&mut self, count: usize, width: f32, height: f32) -> Vec<Particle> {
        (0..count).map(|_| self.spawn(width, height)).collect()
    }

    /// Uniform in `[0, extent)`, or 0 for an empty axis.
    fn coordinate(&mut self, extent: f32) -> f32 {
        if extent > 0.0 && extent.is_finite() {
            self.rng.gen_range(0.0..extent)
        } else {
            0.0
        }
    }

    /// Uniform in `[-max_speed, max_speed]`.
    fn speed(&mut self) -> f32 {
        if self.max_speed > 0.0 {
            self.rng.gen_range(-self.max_speed..=self.max_speed)
        } else {
            0.0
        }
    }
}

/// Seed from the system clock so each run differs.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ranges() {
        let config = FieldConfig::default().with_seed(7);
        let mut spawner = Spawner::new(&config);

        for p in spawner.spawn_many(1_000, 800.0, 600.0) {
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..600.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 0.25);
            assert!(p.velocity.y.abs() <= 0.25);
            assert!((1.0..3.0).contains(&p.radius));
        }
    }

    #[test]
    fn test_same_seed_same_particles() {
        let config = FieldConfig::default().with_seed(1234);
        let a = Spawner::new(&config).spawn_many(50, 640.0, 480.0);
        let b = Spawner::new(&config).spawn_many(50, 640.0, 480.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_viewport() {
        let config = FieldConfig::default().with_seed(3);
        let p = Spawner::new(&config).spawn(0.0, 0.0);
        assert_eq!(p.position, Vec2::ZERO);
    }

    #[test]
    fn test_accent_probability_extremes() {
        let mut config = FieldConfig::default().with_seed(5);

        config.accent_probability = 0.0;
        let none = Spawner::new(&config).spawn_many(500, 100.0, 100.0);
        assert!(none.iter().all(|p| p.category == ColorCategory::Ambient));

        config.accent_probability = 1.0;
        let all = Spawner::new(&config).spawn_many(500, 100.0, 100.0);
        assert!(all.iter().all(|p| p.category == ColorCategory::Accent));
    }

    #[test]
    fn test_unbounded_radius_falls_back_to_min() {
        let mut config = FieldConfig::default().with_seed(8);
        config.max_radius = f32::INFINITY;

        for p in Spawner::new(&config).spawn_many(20, 100.0, 100.0) {
            assert_eq!(p.radius, config.min_radius);
        }
    }
}
