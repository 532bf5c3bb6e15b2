//! Per-code-page conversion and drawing.
//!
//! Every font is bound to one [`TextEncoding`] when it is created. The
//! encoding turns Unicode text into the font's native glyph codes and picks
//! the surface primitive matching the glyph width (one or two bytes).

use std::fmt;

use thiserror::Error;

use super::native::{NativeChar, NativeFont, TextExtents};
use crate::geometry::Point;
use crate::surface::{CharFormat, Surface, TextItem};

/// Code pages a font can be encoded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodePage {
    /// ISO 8859-1: code points up to U+00FF map to themselves.
    #[default]
    Latin1,
    /// Symbol fonts: U+F020..=U+F0FF and U+0020..=U+00FF map to the low byte.
    Symbol,
    /// Two-byte fonts addressed directly by the UTF-16 code unit.
    Ucs2,
}

impl CodePage {
    /// The encoding implementation for this code page.
    pub fn encoding(self) -> &'static dyn TextEncoding {
        match self {
            Self::Latin1 => &Latin1,
            Self::Symbol => &Symbol,
            Self::Ucs2 => &Ucs2,
        }
    }
}

/// A character the font cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{ch:?} has no glyph in {code_page:?} and the font has no default char")]
pub struct ConversionError {
    pub ch: char,
    pub code_page: CodePage,
}

/// Conversion, measurement, and drawing for one code page.
pub trait TextEncoding: fmt::Debug + Send + Sync {
    fn code_page(&self) -> CodePage;

    /// Native code for `ch`, or `None` when the code page cannot express it.
    fn map_char(&self, ch: char) -> Option<NativeChar>;

    /// Glyph width the surface must use for this font.
    fn char_format(&self, font: &NativeFont) -> CharFormat;

    /// Convert a Unicode run to native codes, substituting the font's
    /// default char for anything unmappable.
    fn to_native(
        &self,
        font: &NativeFont,
        text: &[char],
    ) -> Result<Vec<NativeChar>, ConversionError> {
        text.iter()
            .map(|&ch| {
                self.map_char(ch)
                    .or_else(|| font.default_char())
                    .ok_or(ConversionError {
                        ch,
                        code_page: self.code_page(),
                    })
            })
            .collect()
    }

    fn text_width(&self, font: &NativeFont, chars: &[NativeChar]) -> i32 {
        font.text_width(chars)
    }

    fn text_extents(&self, font: &NativeFont, chars: &[NativeChar]) -> TextExtents {
        font.text_extents(chars)
    }

    /// Draw `chars` in one call with the pen starting at `origin`.
    fn draw_string(
        &self,
        surface: &mut dyn Surface,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
    ) {
        surface.draw_string(font, origin, chars, self.char_format(font));
    }

    /// Draw `items` over `chars` in one call.
    fn draw_text(
        &self,
        surface: &mut dyn Surface,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
        items: &[TextItem],
    ) {
        surface.draw_text(font, origin, chars, items, self.char_format(font));
    }
}

#[derive(Debug, Clone, Copy)]
struct Latin1;

impl TextEncoding for Latin1 {
    fn code_page(&self) -> CodePage {
        CodePage::Latin1
    }

    fn map_char(&self, ch: char) -> Option<NativeChar> {
        u8::try_from(u32::from(ch)).ok().map(NativeChar::single)
    }

    fn char_format(&self, _font: &NativeFont) -> CharFormat {
        CharFormat::Byte
    }
}

#[derive(Debug, Clone, Copy)]
struct Symbol;

impl TextEncoding for Symbol {
    fn code_page(&self) -> CodePage {
        CodePage::Symbol
    }

    fn map_char(&self, ch: char) -> Option<NativeChar> {
        match u32::from(ch) {
            c @ (0x20..=0xff | 0xf020..=0xf0ff) => Some(NativeChar::single(c as u8)),
            _ => None,
        }
    }

    fn char_format(&self, _font: &NativeFont) -> CharFormat {
        CharFormat::Byte
    }
}

#[derive(Debug, Clone, Copy)]
struct Ucs2;

impl TextEncoding for Ucs2 {
    fn code_page(&self) -> CodePage {
        CodePage::Ucs2
    }

    fn map_char(&self, ch: char) -> Option<NativeChar> {
        u16::try_from(u32::from(ch)).ok().map(NativeChar::from_code)
    }

    fn char_format(&self, _font: &NativeFont) -> CharFormat {
        CharFormat::Wide
    }
}
