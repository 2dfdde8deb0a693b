//! Field configuration.
//!
//! A [`FieldConfig`] holds every tunable of the particle field. It can be
//! built in code with the `with_*` methods or loaded from JSON, where every
//! key is optional:
//!
//! ```json
//! {
//!     "particle_count": 120,
//!     "attraction_radius": 200.0,
//!     "palette": { "accent": "#d4af37" }
//! }
//! ```

use crate::error::ConfigError;
use crate::schedule::FixedRate;
use crate::visuals::Palette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for a [`ParticleField`](crate::ParticleField) and its render loop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles. Fixed for the field's lifetime; the connection
    /// pass is quadratic in this value.
    pub particle_count: usize,
    /// Initial velocity is drawn from `[-max_initial_speed, max_initial_speed]` per axis.
    pub max_initial_speed: f32,
    /// Particle radius is drawn from `[min_radius, max_radius)`.
    pub min_radius: f32,
    pub max_radius: f32,
    /// Probability that a particle is spawned as an accent particle.
    pub accent_probability: f64,
    /// Pointer distance below which particles are nudged toward it.
    pub attraction_radius: f32,
    /// Nudge length at zero distance, falling off linearly to 0 at the radius.
    pub attraction_strength: f32,
    /// Distance below which two particles are linked.
    pub connection_threshold: f32,
    /// Opacity of a link between coincident particles.
    pub connection_max_alpha: f32,
    /// Stroke width for links.
    pub line_width: f32,
    pub palette: Palette,
    /// Viewport used when the host does not provide one (headless runs).
    pub width: u32,
    pub height: u32,
    /// Frame pacing for [`FixedRate`](crate::FixedRate).
    pub target_fps: f32,
    /// RNG seed. `None` seeds from the system clock.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            max_initial_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            accent_probability: 0.1,
            attraction_radius: 200.0,
            attraction_strength: 1.0,
            connection_threshold: 150.0,
            connection_max_alpha: 0.1,
            line_width: 1.0,
            palette: Palette::default(),
            width: 1280,
            height: 720,
            target_fps: 60.0,
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the pointer attraction radius.
    pub fn with_attraction_radius(mut self, radius: f32) -> Self {
        self.attraction_radius = radius;
        self
    }

    /// Set the connection threshold distance.
    pub fn with_connection_threshold(mut self, threshold: f32) -> Self {
        self.connection_threshold = threshold;
        self
    }

    /// Set the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the default viewport size.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fix the RNG seed for reproducible fields.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A scheduler pacing frames at `target_fps`.
    pub fn frame_rate(&self) -> FixedRate {
        FixedRate::from_fps(self.target_fps)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.max_initial_speed.is_finite() && self.max_initial_speed >= 0.0) {
            return invalid(format!(
                "max_initial_speed must be >= 0, got {}",
                self.max_initial_speed
            ));
        }
        if !(self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius >= 0.0
            && self.min_radius < self.max_radius)
        {
            return invalid(format!(
                "radius range [{}, {}) is empty or negative",
                self.min_radius, self.max_radius
            ));
        }
        if !(0.0..=1.0).contains(&self.accent_probability) {
            return invalid(format!(
                "accent_probability must be within [0, 1], got {}",
                self.accent_probability
            ));
        }
        if !(self.attraction_radius.is_finite() && self.attraction_radius > 0.0) {
            return invalid(format!(
                "attraction_radius must be > 0, got {}",
                self.attraction_radius
            ));
        }
        if !self.attraction_strength.is_finite() {
            return invalid(format!(
                "attraction_strength must be finite, got {}",
                self.attraction_strength
            ));
        }
        if !(self.connection_threshold.is_finite() && self.connection_threshold > 0.0) {
            return invalid(format!(
                "connection_threshold must be > 0, got {}",
                self.connection_threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.connection_max_alpha) {
            return invalid(format!(
                "connection_max_alpha must be within [0, 1], got {}",
                self.connection_max_alpha
            ));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return invalid(format!("line_width must be > 0, got {}", self.line_width));
        }
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return invalid(format!("target_fps must be > 0, got {}", self.target_fps));
        }
        Ok(())
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
