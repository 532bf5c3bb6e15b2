//! Scene file structures and loading logic.

pub mod monitor;

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use textout_core::font::{CharMetrics, FontId, FontProperty};
use textout_core::{
    BackgroundMode, CodePage, DeviceContext, FontFlags, FontObject, HorizontalAlign, NativeFont,
    Point, Rect, RotationTransform, Rgb, TextAlign, VerticalAlign, Xform,
};

/// Why a scene could not be loaded or turned into drawing state.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing scene: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field}: {value:?} is not a #RRGGBB or #RGB color")]
    Color { field: &'static str, value: String },
    #[error("world transform {0:?} is not invertible")]
    SingularTransform([f64; 6]),
    #[error("font must have a positive pixel size, got {0}")]
    PixelSize(f64),
}

/// Top-level scene structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub surface: SurfaceConfig,
    pub font: FontConfig,
    pub context: ContextConfig,
    #[serde(default)]
    pub draw: Vec<DrawConfig>,
}

/// Output image size and clear color.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Clear color ("#RRGGBB" hex).
    pub background: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 120,
            background: "#ffffff".to_owned(),
        }
    }
}

/// Code page a scene font is encoded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePageConfig {
    #[default]
    Latin1,
    Symbol,
    Ucs2,
}

impl From<CodePageConfig> for CodePage {
    fn from(cp: CodePageConfig) -> Self {
        match cp {
            CodePageConfig::Latin1 => Self::Latin1,
            CodePageConfig::Symbol => Self::Symbol,
            CodePageConfig::Ucs2 => Self::Ucs2,
        }
    }
}

/// Synthetic font description.
///
/// Every glyph is a solid box of `char_width` by `ascent + descent` pixels
/// unless `widths` overrides its advance. Space and control characters
/// advance without ink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub id: u32,
    pub ascent: i32,
    pub descent: i32,
    pub char_width: i16,
    /// Per-character advance overrides, keyed by the character.
    pub widths: Vec<(char, i16)>,
    pub code_page: CodePageConfig,
    /// Row range `[first, last]` for two-byte fonts.
    pub byte1: Option<[u8; 2]>,
    /// Column range `[first, last]`.
    pub byte2: [u8; 2],
    pub default_char: Option<u16>,
    pub break_char: u8,
    /// Baseline angle in tenths of a degree, counter-clockwise.
    pub escapement: i32,
    /// Em size for rotated rendering; defaults to `ascent + descent`.
    pub pixel_size: Option<f64>,
    pub rescale: f64,
    pub underline: bool,
    pub strikeout: bool,
    pub underline_position: Option<i64>,
    pub underline_thickness: Option<i64>,
    pub strikeout_ascent: Option<i64>,
    pub strikeout_descent: Option<i64>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            id: 1,
            ascent: 12,
            descent: 4,
            char_width: 8,
            widths: Vec::new(),
            code_page: CodePageConfig::default(),
            byte1: None,
            byte2: [0, 255],
            default_char: Some(u16::from(b'?')),
            break_char: b' ',
            escapement: 0,
            pixel_size: None,
            rescale: 1.0,
            underline: false,
            strikeout: false,
            underline_position: None,
            underline_thickness: None,
            strikeout_ascent: None,
            strikeout_descent: None,
        }
    }
}

impl FontConfig {
    fn em(&self) -> f64 {
        self.pixel_size
            .unwrap_or_else(|| f64::from(self.ascent + self.descent))
    }

    /// Advance of `code` in pixels.
    fn width_of(&self, code: u16) -> i16 {
        char::from_u32(u32::from(code))
            .and_then(|ch| self.widths.iter().find(|(c, _)| *c == ch))
            .map_or(self.char_width, |&(_, w)| w)
    }

    fn metrics_for(&self, code: u16, em: f64) -> CharMetrics {
        let width = self.width_of(code);
        let attributes = (f64::from(width) * 1000.0 / em).round() as u16;
        if code <= 0x20 {
            CharMetrics::blank(width, attributes)
        } else {
            CharMetrics::cell(width, self.ascent as i16, self.descent as i16, attributes)
        }
    }

    /// Build the native font and wrap it with encoding, rotation, and
    /// decorations.
    pub fn build(&self) -> Result<FontObject, ConfigError> {
        let em = self.em();
        if em <= 0.0 || !em.is_finite() {
            return Err(ConfigError::PixelSize(em));
        }

        let [b1_first, b1_last] = self.byte1.unwrap_or([0, 0]);
        let [b2_first, b2_last] = self.byte2;
        let per_char: Vec<CharMetrics> = (b1_first..=b1_last)
            .flat_map(|row| {
                (b2_first..=b2_last).map(move |col| u16::from_be_bytes([row, col]))
            })
            .map(|code| self.metrics_for(code, em))
            .collect();

        let bounds = CharMetrics::cell(
            self.char_width,
            self.ascent as i16,
            self.descent as i16,
            (f64::from(self.char_width) * 1000.0 / em).round() as u16,
        );
        let mut native = NativeFont::new(FontId(self.id), self.ascent, self.descent, bounds)
            .with_byte1_range(b1_first..=b1_last)
            .with_byte2_range(b2_first..=b2_last);
        // Table size always matches the ranges it was built from.
        if let Some(with_table) = native.clone().with_per_char(per_char) {
            native = with_table;
        }
        if let Some(code) = self.default_char {
            native = native.with_default_char(code);
        }
        for (property, value) in [
            (FontProperty::UnderlinePosition, self.underline_position),
            (FontProperty::UnderlineThickness, self.underline_thickness),
            (FontProperty::StrikeoutAscent, self.strikeout_ascent),
            (FontProperty::StrikeoutDescent, self.strikeout_descent),
        ] {
            if let Some(v) = value {
                native = native.with_property(property, v);
            }
        }

        let mut flags = FontFlags::empty();
        flags.set(FontFlags::UNDERLINE, self.underline);
        flags.set(FontFlags::STRIKEOUT, self.strikeout);

        let mut font = FontObject::new(native, self.code_page.into())
            .with_flags(flags)
            .with_break_char(self.break_char)
            .with_rescale(self.rescale);
        if self.escapement % 3600 != 0 {
            let total = f64::from(self.ascent + self.descent).max(1.0);
            let raw = |px: i32| (f64::from(px) * 1000.0 / total).round() as i32;
            font = font.with_rotation(RotationTransform::from_escapement(
                self.escapement,
                em,
                raw(self.ascent),
                raw(self.descent),
            ));
        }
        Ok(font)
    }
}

/// Horizontal reference point of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalConfig {
    #[default]
    Left,
    Right,
    Center,
}

/// Vertical reference point of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalConfig {
    #[default]
    Top,
    Bottom,
    Baseline,
}

/// Background mode for glyph cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundConfig {
    #[default]
    Opaque,
    Transparent,
}

/// Device context state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Device origin on the surface.
    pub origin: [i32; 2],
    /// World-to-device transform `[m11, m12, m21, m22, dx, dy]`.
    pub transform: [f64; 6],
    pub horizontal: HorizontalConfig,
    pub vertical: VerticalConfig,
    pub update_cp: bool,
    /// Initial current position in logical units.
    pub cursor: [i32; 2],
    pub background_mode: BackgroundConfig,
    /// Text background ("#RRGGBB" hex).
    pub background: String,
    /// Text color ("#RRGGBB" hex).
    pub foreground: String,
    pub char_extra: i32,
    /// Justification as `[extra pixels, break count]`.
    pub justify: Option<[i32; 2]>,
    /// Visible region `[left, top, right, bottom]`; defaults to the surface.
    pub visible: Option<[i32; 4]>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            origin: [0, 0],
            transform: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            horizontal: HorizontalConfig::default(),
            vertical: VerticalConfig::default(),
            update_cp: false,
            cursor: [0, 0],
            background_mode: BackgroundConfig::default(),
            background: "#ffffff".to_owned(),
            foreground: "#000000".to_owned(),
            char_extra: 0,
            justify: None,
            visible: None,
        }
    }
}

impl ContextConfig {
    /// Build a device context drawing onto a `width` by `height` surface.
    pub fn build(&self, width: u32, height: u32) -> Result<DeviceContext, ConfigError> {
        let [ox, oy] = self.origin;
        let visible = self.visible.map_or_else(
            || Rect::new(-ox, -oy, width as i32 - ox, height as i32 - oy),
            |[l, t, r, b]| Rect::new(l, t, r, b),
        );
        let mut dc = DeviceContext::new(Point::new(ox, oy), visible);

        let [m11, m12, m21, m22, dx, dy] = self.transform;
        let xform = Xform {
            m11,
            m12,
            m21,
            m22,
            dx,
            dy,
        };
        if !dc.set_world_transform(xform) {
            return Err(ConfigError::SingularTransform(self.transform));
        }

        let horizontal = match self.horizontal {
            HorizontalConfig::Left => HorizontalAlign::Left,
            HorizontalConfig::Right => HorizontalAlign::Right,
            HorizontalConfig::Center => HorizontalAlign::Center,
        };
        let vertical = match self.vertical {
            VerticalConfig::Top => VerticalAlign::Top,
            VerticalConfig::Bottom => VerticalAlign::Bottom,
            VerticalConfig::Baseline => VerticalAlign::Baseline,
        };
        let mut align = TextAlign::new(horizontal, vertical);
        if self.update_cp {
            align = align.with_update_cp();
        }
        dc.text_align = align;
        dc.background_mode = match self.background_mode {
            BackgroundConfig::Opaque => BackgroundMode::Opaque,
            BackgroundConfig::Transparent => BackgroundMode::Transparent,
        };
        dc.background_color = color_field("context.background", &self.background)?;
        dc.text_color = color_field("context.foreground", &self.foreground)?;
        dc.char_extra = self.char_extra;
        if let Some([extra, breaks]) = self.justify {
            dc.set_text_justification(extra, breaks);
        }
        dc.move_to(Point::new(self.cursor[0], self.cursor[1]));
        Ok(dc)
    }
}

/// One text output request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub opaque: bool,
    pub clipped: bool,
    /// Fill/clip rectangle `[left, top, right, bottom]` in logical units.
    pub rect: Option<[i32; 4]>,
    pub advances: Option<Vec<i32>>,
    /// Text color override ("#RRGGBB" hex).
    pub color: Option<String>,
}

impl SceneConfig {
    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::parse(&data)?;
        info!(
            "scene: loaded {} ({} draws)",
            path.display(),
            scene.draw.len()
        );
        Ok(scene)
    }

    pub fn parse(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    /// The surface clear color.
    pub fn surface_background(&self) -> Result<Rgb, ConfigError> {
        color_field("surface.background", &self.surface.background)
    }
}

/// Parse a `#RRGGBB` or `#RGB` color string.
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    match hex.len() {
        6 => Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Some(Rgb::new(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => None,
    }
}

pub(crate) fn color_field(field: &'static str, value: &str) -> Result<Rgb, ConfigError> {
    parse_hex_color(value).ok_or_else(|| ConfigError::Color {
        field,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests;
