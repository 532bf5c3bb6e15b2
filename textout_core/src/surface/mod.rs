//! Drawable surface primitives.
//!
//! The `Surface` trait is the seam between text output and whatever draws
//! pixels. It follows a graphics-context model: colors and line attributes
//! are state set before the primitive that uses them. The surface is always
//! passed in explicitly; nothing here reaches for a global display.

mod recording;

pub use recording::{DrawOp, RecordingSurface};

use crate::color::Rgb;
use crate::font::{NativeChar, NativeFont};
use crate::geometry::{Point, Rect};

/// Width of the glyph codes handed to a string primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharFormat {
    /// One byte per glyph (`byte2` only).
    Byte,
    /// Two bytes per glyph.
    Wide,
}

/// A run of characters drawn after shifting the pen by `delta` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextItem {
    /// Index of the first character in the converted run.
    pub start: usize,
    /// Number of characters in the item.
    pub len: usize,
    /// Horizontal pen shift applied before the first character.
    pub delta: i32,
}

impl TextItem {
    /// The characters this item covers.
    pub fn chars<'a>(&self, run: &'a [NativeChar]) -> &'a [NativeChar] {
        &run[self.start..self.start + self.len]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapStyle {
    #[default]
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStyle {
    #[default]
    Bevel,
}

/// Line state for [`Surface::draw_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineAttributes {
    /// Zero draws the thinnest line the surface supports.
    pub width: u32,
    pub style: LineStyle,
    pub cap: CapStyle,
    pub join: JoinStyle,
}

impl LineAttributes {
    /// Solid line with round caps and bevel joins, as used for text
    /// decorations. Negative widths clamp to zero.
    pub fn decoration(width: i32) -> Self {
        Self {
            width: u32::try_from(width).unwrap_or(0),
            style: LineStyle::Solid,
            cap: CapStyle::Round,
            join: JoinStyle::Bevel,
        }
    }
}

/// Pixel-level drawing primitives.
///
/// All coordinates are drawable coordinates: callers add the device
/// context's origin before calling.
pub trait Surface {
    /// Color used by every following primitive.
    fn set_foreground(&mut self, color: Rgb);

    /// Limit every following primitive to `clip`.
    fn set_clip(&mut self, clip: Rect);

    /// Fill `rect` with the foreground color.
    fn fill_rectangle(&mut self, rect: Rect);

    fn set_line_attributes(&mut self, attrs: LineAttributes);

    fn draw_line(&mut self, from: Point, to: Point);

    /// Draw `chars` with the pen starting on the baseline at `origin`.
    fn draw_string(
        &mut self,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
        format: CharFormat,
    );

    /// Draw several items in one call; each item shifts the pen by its
    /// delta before drawing its characters.
    fn draw_text(
        &mut self,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
        items: &[TextItem],
        format: CharFormat,
    );
}
