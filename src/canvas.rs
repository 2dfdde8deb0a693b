//! Software RGBA canvas.
//!
//! Pixels are straight-alpha RGBA8, row-major, origin top-left, and blended
//! source-over. Discs cover every pixel whose center lies inside the radius;
//! lines are stepped one pixel at a time along the major axis after being
//! clipped to the canvas.

use crate::error::SnapshotError;
use crate::surface::Surface;
use crate::visuals::Color;
use glam::Vec2;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// In-memory raster surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let fill = background.to_rgba8();
        Self {
            width,
            height,
            background,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Reallocate for a new size. Contents are reset to the background.
    ///
    /// [`HostEvent::Resized`](crate::HostEvent) only reaches the field; a host
    /// rendering into a `Canvas` resizes it alongside, through
    /// [`RenderLoop::surface_mut`](crate::RenderLoop::surface_mut).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background.to_rgba8(); width as usize * height as usize];
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer.
    pub fn to_image(&self) -> Result<RgbaImage, SnapshotError> {
        let bytes = self.as_bytes().to_vec();
        let expected = self.width as usize * self.height as usize * 4;
        let actual = bytes.len();
        RgbaImage::from_raw(self.width, self.height, bytes)
            .ok_or(SnapshotError::BufferSize { expected, actual })
    }

    /// Write the canvas as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let image = self.to_image()?;
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Source-over blend `color` onto the pixel at `(x, y)` if it exists.
    fn blend(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.pixels[idx] = blend_over(self.pixels[idx], color);
    }

    fn plot_square(&mut self, x: i64, y: i64, size: i64, color: Color) {
        let offset = (size - 1) / 2;
        for dy in 0..size {
            for dx in 0..size {
                self.blend(x - offset + dx, y - offset + dy, color);
            }
        }
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        let fill = self.background.to_rgba8();
        self.pixels.fill(fill);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 || color.a <= 0.0 {
            return;
        }

        let min_x = ((center.x - radius).floor() as i64).max(0);
        let min_y = ((center.y - radius).floor() as i64).max(0);
        let max_x = ((center.x + radius).ceil() as i64).min(self.width as i64 - 1);
        let max_y = ((center.y + radius).ceil() as i64).min(self.height as i64 - 1);
        let r2 = radius * radius;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if pixel_center.distance_squared(center) <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        if color.a <= 0.0 || !width.is_finite() || width <= 0.0 {
            return;
        }
        let bounds = Vec2::new(self.width as f32, self.height as f32);
        let Some((a, b)) = clip_segment(from, to, bounds) else {
            return;
        };

        let delta = b - a;
        let steps = delta.x.abs().max(delta.y.abs()).ceil() as i64;
        if steps == 0 {
            return;
        }

        let size = (width.round() as i64).max(1);
        let increment = delta / steps as f32;
        let mut last = None;
        for i in 0..=steps {
            let p = a + increment * i as f32;
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            // Each pixel is blended once per stroke.
            if last != Some(cell) {
                self.plot_square(cell.0, cell.1, size, color);
                last = Some(cell);
            }
        }
    }
}

/// Straight-alpha source-over.
fn blend_over(dst: [u8; 4], src: Color) -> [u8; 4] {
    let sa = src.a.clamp(0.0, 1.0);
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mix = |s: f32, d: u8| {
        (s.clamp(0.0, 1.0) * sa + (d as f32 / 255.0) * da * (1.0 - sa)) / out_a
    };
    Color::rgba(mix(src.r, dst[0]), mix(src.g, dst[1]), mix(src.b, dst[2]), out_a).to_rgba8()
}

/// Liang–Barsky clip of segment `a`-`b` against `[0, bounds]`.
fn clip_segment(a: Vec2, b: Vec2, bounds: Vec2) -> Option<(Vec2, Vec2)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }

    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-d.x, a.x),
        (d.x, bounds.x - a.x),
        (-d.y, a.y),
        (d.y, bounds.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    if t0 > t1 {
        return None;
    }
    Some((a + d * t0, a + d * t1))
}
