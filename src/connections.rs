//! Connection pass: faint lines between nearby particles.
//!
//! Every unordered pair closer than the threshold is linked with an opacity
//! that falls off linearly with distance. The scan is the naive O(N²) one,
//! 4,950 pair tests for the default 100 particles, so particle count is a
//! fixed configuration value rather than something that grows at runtime.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use glam::Vec2;

/// A link between two particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle (always less than `b`).
    pub a: usize,
    pub b: usize,
    pub from: Vec2,
    pub to: Vec2,
    /// Opacity in `(0, max_alpha]`.
    pub alpha: f32,
}

/// Opacity for a pair `distance` apart, or `None` at or beyond `threshold`.
#[inline]
pub fn connection_alpha(distance: f32, threshold: f32, max_alpha: f32) -> Option<f32> {
    if distance < threshold {
        Some((1.0 - distance / threshold) * max_alpha)
    } else {
        None
    }
}

/// Iterate the links between `particles`.
///
/// Pairs are visited in `(a, b)` order with `a < b`; a particle is never
/// linked to itself.
pub fn connections(
    particles: &[Particle],
    threshold: f32,
    max_alpha: f32,
) -> impl Iterator<Item = Connection> + '_ {
    particles.iter().enumerate().flat_map(move |(a, pa)| {
        particles[a + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, pb)| {
                let distance = pa.position.distance(pb.position);
                connection_alpha(distance, threshold, max_alpha).map(|alpha| Connection {
                    a,
                    b: a + 1 + offset,
                    from: pa.position,
                    to: pb.position,
                    alpha,
                })
            })
    })
}

/// Stroke every link onto `surface`. Returns how many were drawn.
pub fn draw_connections<S: Surface + ?Sized>(
    particles: &[Particle],
    config: &FieldConfig,
    surface: &mut S,
) -> usize {
    let base = config.palette.connection;
    let mut drawn = 0;

    for link in connections(
        particles,
        config.connection_threshold,
        config.connection_max_alpha,
    ) {
        surface.stroke_line(link.from, link.to, base.fade(link.alpha), config.line_width);
        drawn += 1;
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};
    use crate::visuals::ColorCategory;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0, ColorCategory::Ambient)
    }

    #[test]
    fn test_alpha_falloff() {
        assert_eq!(connection_alpha(0.0, 150.0, 0.1), Some(0.1));
        let mid = connection_alpha(75.0, 150.0, 0.1).unwrap();
        assert!((mid - 0.05).abs() < 1e-6);
        assert_eq!(connection_alpha(150.0, 150.0, 0.1), None);
        assert_eq!(connection_alpha(151.0, 150.0, 0.1), None);
    }

    #[test]
    fn test_exact_threshold_not_linked() {
        let particles = [at(0.0, 0.0), at(150.0, 0.0)];
        assert_eq!(connections(&particles, 150.0, 0.1).count(), 0);

        // 90-120-150 triangle.
        let particles = [at(0.0, 0.0), at(90.0, 120.0)];
        assert_eq!(connections(&particles, 150.0, 0.1).count(), 0);
    }

    #[test]
    fn test_coincident_particles_max_alpha() {
        let particles = [at(42.0, 42.0), at(42.0, 42.0)];
        let links: Vec<_> = connections(&particles, 150.0, 0.1).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].alpha, 0.1);
        assert!(links[0].alpha.is_finite());
    }

    #[test]
    fn test_pairs_are_unordered_without_self() {
        let particles = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0), at(1000.0, 0.0)];
        let pairs: Vec<_> = connections(&particles, 150.0, 0.1)
            .map(|c| (c.a, c.b))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(connections(&[], 150.0, 0.1).count(), 0);
        assert_eq!(connections(&[at(1.0, 1.0)], 150.0, 0.1).count(), 0);
    }

    #[test]
    fn test_draw_connections_colors() {
        let config = FieldConfig::default();
        let particles = [at(0.0, 0.0), at(0.0, 0.0), at(75.0, 0.0)];
        let mut rec = Recorder::new();

        let drawn = draw_connections(&particles, &config, &mut rec);
        assert_eq!(drawn, 3);

        let alphas: Vec<f32> = rec
            .lines()
            .map(|c| match c {
                DrawCommand::Line { color, width, .. } => {
                    assert_eq!(*width, 1.0);
                    color.a
                }
                _ => unreachable!(),
            })
            .collect();
        assert!((alphas[0] - 0.1).abs() < 1e-6);
        assert!((alphas[1] - 0.05).abs() < 1e-6);
        assert!((alphas[2] - 0.05).abs() < 1e-6);
    }
}
