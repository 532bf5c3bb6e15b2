//! Server-side font description: glyph ranges, per-character metrics, and
//! named properties.
//!
//! This is the windowing library's view of a font. Glyphs are addressed by
//! one or two bytes; single-byte fonts keep `byte1` at zero. When the font
//! carries no per-character table every glyph shares `min_bounds`.

use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Handle identifying a font on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u32);

/// A glyph index in the font's native encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NativeChar {
    /// High byte (row) for two-byte fonts, zero otherwise.
    pub byte1: u8,
    /// Low byte (column).
    pub byte2: u8,
}

impl NativeChar {
    pub const fn single(byte: u8) -> Self {
        Self {
            byte1: 0,
            byte2: byte,
        }
    }

    pub const fn double(byte1: u8, byte2: u8) -> Self {
        Self { byte1, byte2 }
    }

    /// Both bytes as one 16-bit code.
    pub const fn code(self) -> u16 {
        ((self.byte1 as u16) << 8) | self.byte2 as u16
    }

    pub const fn from_code(code: u16) -> Self {
        Self::double((code >> 8) as u8, code as u8)
    }
}

/// Metrics of one glyph, in pixels except `attributes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharMetrics {
    /// Left edge of the ink relative to the pen position.
    pub lbearing: i16,
    /// Right edge of the ink relative to the pen position.
    pub rbearing: i16,
    /// Pen advance.
    pub width: i16,
    /// Ink extent above the baseline.
    pub ascent: i16,
    /// Ink extent below the baseline.
    pub descent: i16,
    /// Advance in 1/1000 em, used for scalable (rotated) rendering.
    pub attributes: u16,
}

impl CharMetrics {
    /// A glyph whose ink fills its whole cell.
    pub const fn cell(width: i16, ascent: i16, descent: i16, attributes: u16) -> Self {
        Self {
            lbearing: 0,
            rbearing: width,
            width,
            ascent,
            descent,
            attributes,
        }
    }

    /// A glyph with an advance but no ink (space and control characters).
    pub const fn blank(width: i16, attributes: u16) -> Self {
        Self {
            lbearing: 0,
            rbearing: 0,
            width,
            ascent: 0,
            descent: 0,
            attributes,
        }
    }

    /// Whether drawing this glyph marks any pixels.
    pub const fn has_ink(&self) -> bool {
        self.rbearing > self.lbearing && self.ascent + self.descent > 0
    }
}

/// Named font properties consulted for decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontProperty {
    UnderlinePosition,
    UnderlineThickness,
    StrikeoutAscent,
    StrikeoutDescent,
}

/// Result of an extents query over a run of native characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtents {
    pub ascent: i32,
    pub descent: i32,
    pub width: i32,
}

/// A font as the windowing library describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFont {
    id: FontId,
    pub ascent: i32,
    pub descent: i32,
    byte1: RangeInclusive<u8>,
    byte2: RangeInclusive<u8>,
    default_char: Option<u16>,
    per_char: Option<Vec<CharMetrics>>,
    min_bounds: CharMetrics,
    properties: HashMap<FontProperty, i64>,
}

impl NativeFont {
    /// A single-byte font covering `0..=255` where every glyph shares
    /// `bounds`.
    pub fn new(id: FontId, ascent: i32, descent: i32, bounds: CharMetrics) -> Self {
        Self {
            id,
            ascent,
            descent,
            byte1: 0..=0,
            byte2: 0..=u8::MAX,
            default_char: None,
            per_char: None,
            min_bounds: bounds,
            properties: HashMap::new(),
        }
    }

    /// Restrict the row range (two-byte fonts).
    #[must_use]
    pub fn with_byte1_range(mut self, range: RangeInclusive<u8>) -> Self {
        self.byte1 = range;
        self
    }

    /// Restrict the column range.
    #[must_use]
    pub fn with_byte2_range(mut self, range: RangeInclusive<u8>) -> Self {
        self.byte2 = range;
        self
    }

    /// Install a per-character table, indexed row-major over the byte
    /// ranges. Returns `None` when the table size does not match.
    pub fn with_per_char(mut self, metrics: Vec<CharMetrics>) -> Option<Self> {
        if metrics.len() != self.glyph_count() {
            return None;
        }
        self.per_char = Some(metrics);
        Some(self)
    }

    #[must_use]
    pub fn with_default_char(mut self, code: u16) -> Self {
        self.default_char = Some(code);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: FontProperty, value: i64) -> Self {
        self.properties.insert(property, value);
        self
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    /// Glyph substituted for characters the font lacks.
    pub fn default_char(&self) -> Option<NativeChar> {
        self.default_char.map(NativeChar::from_code)
    }

    /// Whether the font has rows beyond zero.
    pub fn is_two_byte(&self) -> bool {
        *self.byte1.end() > 0
    }

    pub fn property(&self, property: FontProperty) -> Option<i64> {
        self.properties.get(&property).copied()
    }

    /// Whether `c` addresses a glyph inside the font's ranges.
    pub fn contains(&self, c: NativeChar) -> bool {
        self.byte1.contains(&c.byte1) && self.byte2.contains(&c.byte2)
    }

    fn glyph_count(&self) -> usize {
        range_len(&self.byte1) * range_len(&self.byte2)
    }

    fn index_of(&self, c: NativeChar) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        let row = usize::from(c.byte1 - self.byte1.start());
        let col = usize::from(c.byte2 - self.byte2.start());
        Some(row * range_len(&self.byte2) + col)
    }

    fn lookup(&self, c: NativeChar) -> Option<CharMetrics> {
        let idx = self.index_of(c)?;
        match &self.per_char {
            Some(table) => table.get(idx).copied(),
            None => Some(self.min_bounds),
        }
    }

    /// Metrics for `c`, falling back to the default char, then to an empty
    /// glyph.
    pub fn metrics(&self, c: NativeChar) -> CharMetrics {
        self.lookup(c)
            .or_else(|| self.default_char().and_then(|d| self.lookup(d)))
            .unwrap_or_default()
    }

    /// Sum of pen advances.
    pub fn text_width(&self, chars: &[NativeChar]) -> i32 {
        chars
            .iter()
            .fold(0i32, |w, &c| w.saturating_add(i32::from(self.metrics(c).width)))
    }

    /// Font-wide ascent and descent plus the summed advance.
    pub fn text_extents(&self, chars: &[NativeChar]) -> TextExtents {
        TextExtents {
            ascent: self.ascent,
            descent: self.descent,
            width: self.text_width(chars),
        }
    }
}

fn range_len(range: &RangeInclusive<u8>) -> usize {
    if range.is_empty() {
        0
    } else {
        usize::from(range.end() - range.start()) + 1
    }
}
