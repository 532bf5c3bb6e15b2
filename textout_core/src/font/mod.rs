//! The active font: native font data, encoding, rotation, and decorations.
//!
//! `FontObject` bundles what text output needs from the font layer. The
//! encoding is resolved once from the code page at construction and cached,
//! so measurement and drawing never dispatch on the code page again.

pub mod encoding;
pub mod native;

use bitflags::bitflags;

pub use encoding::{CodePage, ConversionError, TextEncoding};
pub use native::{
    CharMetrics, FontId, FontProperty, NativeChar, NativeFont, TextExtents,
};

bitflags! {
    /// Decorations synthesized by text output rather than the font.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FontFlags: u8 {
        const UNDERLINE = 1 << 0;
        const STRIKEOUT = 1 << 1;
    }
}

/// Linear map from advance space to device space for an escaped font.
///
/// `a`/`b` carry an advance along the baseline, `c`/`d` a distance across
/// it. All four are scaled by `pixel_size`, so a displacement of `n` pixels
/// is `n * coefficient / pixel_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub pixel_size: f64,
    /// Ascent in pixels.
    pub ascent: i32,
    /// Descent in pixels.
    pub descent: i32,
    /// Ascent in 1/1000 em.
    pub raw_ascent: i32,
    /// Descent in 1/1000 em.
    pub raw_descent: i32,
}

impl RotationTransform {
    /// Transform for a font escaped by `escapement` tenths of a degree,
    /// counter-clockwise.
    pub fn from_escapement(
        escapement: i32,
        pixel_size: f64,
        raw_ascent: i32,
        raw_descent: i32,
    ) -> Self {
        let angle = (f64::from(escapement) / 10.0).to_radians();
        let (sin, cos) = angle.sin_cos();
        let to_pixels = |raw: i32| (f64::from(raw) * pixel_size / 1000.0).round() as i32;
        Self {
            a: pixel_size * cos,
            b: pixel_size * sin,
            c: -pixel_size * sin,
            d: pixel_size * cos,
            pixel_size,
            ascent: to_pixels(raw_ascent),
            descent: to_pixels(raw_descent),
            raw_ascent,
            raw_descent,
        }
    }

    /// Device displacement of an advance of `length` pixels along the
    /// baseline. Positive `y` points up the screen.
    pub fn along(&self, length: f64) -> (f64, f64) {
        (
            length * self.a / self.pixel_size,
            length * self.b / self.pixel_size,
        )
    }

    /// Device displacement of a distance of `length` pixels across the
    /// baseline (towards the descent side).
    pub fn across(&self, length: f64) -> (f64, f64) {
        (
            length * self.c / self.pixel_size,
            length * self.d / self.pixel_size,
        )
    }
}

/// Underline placement relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnderlineMetrics {
    /// Offset below the baseline.
    pub position: i32,
    /// Line width; zero selects the thinnest line the surface can draw.
    pub thickness: i32,
}

/// Strike-out band relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeoutMetrics {
    /// Top of the band above the baseline.
    pub ascent: i32,
    /// Bottom of the band, measured the same way (negative sits above).
    pub descent: i32,
}

impl StrikeoutMetrics {
    pub fn thickness(&self) -> i32 {
        self.ascent + self.descent
    }
}

/// The font selected into a device context.
#[derive(Debug, Clone)]
pub struct FontObject {
    native: NativeFont,
    encoding: &'static dyn TextEncoding,
    rotation: Option<RotationTransform>,
    flags: FontFlags,
    break_char: u8,
    rescale: f64,
}

impl FontObject {
    /// Wrap `native`, binding the encoding for `code_page`.
    pub fn new(native: NativeFont, code_page: CodePage) -> Self {
        Self {
            native,
            encoding: code_page.encoding(),
            rotation: None,
            flags: FontFlags::empty(),
            break_char: b' ',
            rescale: 1.0,
        }
    }

    /// Attach a rotation transform (fonts with non-zero escapement).
    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationTransform) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: FontFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_break_char(mut self, break_char: u8) -> Self {
        self.break_char = break_char;
        self
    }

    #[must_use]
    pub fn with_rescale(mut self, rescale: f64) -> Self {
        self.rescale = rescale;
        self
    }

    pub fn native(&self) -> &NativeFont {
        &self.native
    }

    pub fn encoding(&self) -> &'static dyn TextEncoding {
        self.encoding
    }

    pub fn code_page(&self) -> CodePage {
        self.encoding.code_page()
    }

    pub fn rotation(&self) -> Option<&RotationTransform> {
        self.rotation.as_ref()
    }

    pub fn flags(&self) -> FontFlags {
        self.flags
    }

    /// Low byte of the character that receives break spacing.
    pub fn break_char(&self) -> u8 {
        self.break_char
    }

    pub fn rescale(&self) -> f64 {
        self.rescale
    }

    /// Pixel ascent, from the rotation transform when there is one.
    pub fn ascent(&self) -> i32 {
        self.rotation.map_or(self.native.ascent, |t| t.ascent)
    }

    /// Pixel descent, from the rotation transform when there is one.
    pub fn descent(&self) -> i32 {
        self.rotation.map_or(self.native.descent, |t| t.descent)
    }

    /// Underline metrics from the font properties.
    ///
    /// Position defaults to `descent - 1`. Thickness defaults to zero, and a
    /// declared thickness of one also collapses to zero (thin line).
    pub fn underline_metrics(&self) -> UnderlineMetrics {
        let position = self
            .property(FontProperty::UnderlinePosition)
            .unwrap_or(self.descent() - 1);
        let thickness = match self.property(FontProperty::UnderlineThickness) {
            None | Some(1) => 0,
            Some(t) => t,
        };
        UnderlineMetrics {
            position,
            thickness,
        }
    }

    /// Strike-out metrics from the font properties.
    ///
    /// Ascent defaults to half the font ascent, descent to `-ascent * 2 / 3`.
    pub fn strikeout_metrics(&self) -> StrikeoutMetrics {
        let ascent = self
            .property(FontProperty::StrikeoutAscent)
            .unwrap_or(self.ascent() / 2);
        let descent = self
            .property(FontProperty::StrikeoutDescent)
            .unwrap_or(-ascent * 2 / 3);
        StrikeoutMetrics { ascent, descent }
    }

    fn property(&self, property: FontProperty) -> Option<i32> {
        self.native
            .property(property)
            .and_then(|v| i32::try_from(v).ok())
    }
}
