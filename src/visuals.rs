//! Colors and palettes for particle rendering.
//!
//! Every particle belongs to a [`ColorCategory`] chosen once at spawn time.
//! The [`Palette`] maps categories to render colors and also holds the
//! connection line and background colors.
//!
//! # Usage
//!
//! ```ignore
//! let palette = Palette {
//!     accent: Color::from_hex("#ff6f61")?,
//!     ..Palette::default()
//! };
//! let config = FieldConfig::default().with_palette(palette);
//! ```

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Which palette entry a particle is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorCategory {
    /// Rare highlight particles (gold by default).
    Accent,
    /// The bulk of the field (translucent white by default).
    #[default]
    Ambient,
}

/// Straight (non-premultiplied) RGBA color, components in `0.0..=1.0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let digits = hex.trim().trim_start_matches('#');
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(format!("expected #rrggbb or #rrggbbaa, got '{}'", hex));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("invalid hex digits in '{}'", hex))
        };

        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Same color with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha multiplied by `factor`.
    #[inline]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Quantize to 8-bit channels, clamping out-of-range components.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Accepted JSON forms for a color: a hex string or an `{r, g, b, a}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Components {
        r: f32,
        g: f32,
        b: f32,
        #[serde(default = "opaque")]
        a: f32,
    },
}

fn opaque() -> f32 {
    1.0
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Color::from_hex(&s),
            ColorRepr::Components { r, g, b, a } => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

/// Render colors for the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill for [`ColorCategory::Accent`] particles.
    pub accent: Color,
    /// Fill for [`ColorCategory::Ambient`] particles.
    pub ambient: Color,
    /// Stroke for connection lines. Its alpha is multiplied by the
    /// per-connection opacity.
    pub connection: Color,
    /// What `clear` paints the surface with.
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            // #d4af37
            accent: Color::from_rgba8(0xd4, 0xaf, 0x37, 0xff),
            ambient: Color::rgba(1.0, 1.0, 1.0, 0.5),
            connection: Color::WHITE,
            // #0a0f1c
            background: Color::from_rgba8(0x0a, 0x0f, 0x1c, 0xff),
        }
    }
}

impl Palette {
    /// Fill color for a particle category.
    #[inline]
    pub fn color_for(&self, category: ColorCategory) -> Color {
        match category {
            ColorCategory::Accent => self.accent,
            ColorCategory::Ambient => self.ambient,
        }
    }
}
