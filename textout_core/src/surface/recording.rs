//! A surface that records primitives instead of drawing them.
//!
//! Used by tests and headless callers to inspect exactly what text output
//! issued, in order.

use super::{CharFormat, LineAttributes, Surface, TextItem};
use crate::color::Rgb;
use crate::font::{FontId, NativeChar, NativeFont};
use crate::geometry::{Point, Rect};

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    SetForeground(Rgb),
    SetClip(Rect),
    FillRectangle(Rect),
    SetLineAttributes(LineAttributes),
    DrawLine {
        from: Point,
        to: Point,
    },
    DrawString {
        font: FontId,
        origin: Point,
        chars: Vec<NativeChar>,
        format: CharFormat,
    },
    DrawText {
        font: FontId,
        origin: Point,
        chars: Vec<NativeChar>,
        items: Vec<TextItem>,
        format: CharFormat,
    },
}

impl DrawOp {
    /// Whether this op puts glyphs on the surface.
    pub fn is_glyph_draw(&self) -> bool {
        matches!(self, Self::DrawString { .. } | Self::DrawText { .. })
    }

    /// Whether this op modifies pixels.
    pub fn is_paint(&self) -> bool {
        self.is_glyph_draw() || matches!(self, Self::FillRectangle(_) | Self::DrawLine { .. })
    }
}

/// Records every primitive in call order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain the recorded ops.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn glyph_draws(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| op.is_glyph_draw())
    }

    /// Rectangles filled, in order.
    pub fn fills(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRectangle(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Whether any recorded op modifies pixels.
    pub fn painted(&self) -> bool {
        self.ops.iter().any(DrawOp::is_paint)
    }
}

impl Surface for RecordingSurface {
    fn set_foreground(&mut self, color: Rgb) {
        self.ops.push(DrawOp::SetForeground(color));
    }

    fn set_clip(&mut self, clip: Rect) {
        self.ops.push(DrawOp::SetClip(clip));
    }

    fn fill_rectangle(&mut self, rect: Rect) {
        self.ops.push(DrawOp::FillRectangle(rect));
    }

    fn set_line_attributes(&mut self, attrs: LineAttributes) {
        self.ops.push(DrawOp::SetLineAttributes(attrs));
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.ops.push(DrawOp::DrawLine { from, to });
    }

    fn draw_string(
        &mut self,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
        format: CharFormat,
    ) {
        self.ops.push(DrawOp::DrawString {
            font: font.id(),
            origin,
            chars: chars.to_vec(),
            format,
        });
    }

    fn draw_text(
        &mut self,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
        items: &[TextItem],
        format: CharFormat,
    ) {
        self.ops.push(DrawOp::DrawText {
            font: font.id(),
            origin,
            chars: chars.to_vec(),
            items: items.to_vec(),
            format,
        });
    }
}
