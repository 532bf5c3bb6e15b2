//! Text output and measurement.
//!
//! [`ext_text_out`] draws a run of characters with optional background
//! fill, clipping, explicit advances, alignment, and decorations.
//! [`text_extent`] measures the same run without drawing. Both ignore a
//! single trailing line feed.

pub mod items;
pub mod measure;
pub mod render;

use bitflags::bitflags;
use thiserror::Error;

pub use measure::text_extent;
pub use render::ext_text_out;

use crate::font::ConversionError;
use crate::geometry::{Point, Rect};

bitflags! {
    /// Per-request output options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextOutFlags: u32 {
        /// Fill the request rectangle with the background color first.
        const OPAQUE  = 0x0002;
        /// Clip glyphs to the request rectangle.
        const CLIPPED = 0x0004;
    }
}

/// One text output request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest<'a> {
    /// Reference point in logical units.
    pub origin: Point,
    pub flags: TextOutFlags,
    /// Fill/clip rectangle in logical units.
    pub rect: Option<Rect>,
    pub text: &'a str,
    /// Logical advance of each character.
    pub advances: Option<&'a [i32]>,
}

impl<'a> DrawRequest<'a> {
    pub fn new(origin: Point, text: &'a str) -> Self {
        Self {
            origin,
            flags: TextOutFlags::empty(),
            rect: None,
            text,
            advances: None,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TextOutFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    #[must_use]
    pub fn with_advances(mut self, advances: &'a [i32]) -> Self {
        self.advances = Some(advances);
        self
    }
}

/// Why a text operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("clipping requested without a rectangle")]
    ClipWithoutRect,
    #[error("{got} advances supplied for {expected} characters")]
    AdvanceCount { expected: usize, got: usize },
    #[error("measuring text failed: {0}")]
    Measure(#[source] ConversionError),
    #[error("converting text to native glyphs failed: {0}")]
    Convert(#[from] ConversionError),
    #[error("allocating {0} text items failed")]
    ItemAllocation(usize),
    #[error("text extends past the device coordinate range")]
    CoordinateOverflow,
}

/// Characters of `text` without a single trailing line feed.
pub(crate) fn layout_chars(text: &str) -> Vec<char> {
    let mut chars: Vec<char> = text.chars().collect();
    if chars.last() == Some(&'\n') {
        chars.pop();
    }
    chars
}
