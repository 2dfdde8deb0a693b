//! Drawing surfaces.
//!
//! The field and connection pass draw through the [`Surface`] trait, which
//! is the whole output contract: clear, fill a disc, stroke a segment.
//! [`Canvas`](crate::Canvas) rasterizes into memory; [`Recorder`] keeps the
//! calls as [`DrawCommand`]s so a host can replay them onto its own canvas.

use crate::visuals::Color;
use glam::Vec2;

/// Something particles and connections can be drawn onto.
pub trait Surface {
    /// Erase everything drawn since the last clear.
    fn clear(&mut self);

    /// Fill a disc of `radius` centered at `center`.
    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke a straight segment from `from` to `to`.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        (**self).fill_disc(center, radius, color)
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        (**self).stroke_line(from, to, color, width)
    }
}

/// A recorded [`Surface`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
}

/// Surface that records the calls made on it since the last clear.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands since the last clear, starting with the `Clear` itself.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
