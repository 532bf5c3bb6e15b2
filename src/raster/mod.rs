//! Software raster surface.
//!
//! [`PixelSurface`] turns drawing primitives into pixels in an RGBA buffer.
//! Glyphs have no outlines here: each inked character paints its bounding
//! box (bearing to bearing, ascent to descent), which is enough to see
//! placement, alignment, clipping, and spacing in the output image.

use std::path::Path;

use image::{Rgba, RgbaImage};
use log::debug;
use thiserror::Error;

use textout_core::font::{NativeChar, NativeFont};
use textout_core::surface::{CharFormat, LineAttributes, Surface, TextItem};
use textout_core::{Point, Rect, Rgb};

/// Why a raster could not be written out.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("writing {}: {source}", path.display())]
    Save {
        path: std::path::PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// RGBA pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct PixelSurface {
    image: RgbaImage,
    foreground: Rgb,
    clip: Rect,
    line: LineAttributes,
}

impl PixelSurface {
    /// A `width` by `height` surface cleared to `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background.to_rgba())),
            foreground: Rgb::BLACK,
            clip: Rect::new(0, 0, width as i32, height as i32),
            line: LineAttributes::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        let Rgba([r, g, b, _]) = *self.image.get_pixel_checked(x, y)?;
        Some(Rgb::new(r, g, b))
    }

    /// Number of pixels equal to `color`.
    pub fn count(&self, color: Rgb) -> usize {
        let want = Rgba(color.to_rgba());
        self.image.pixels().filter(|&&p| p == want).count()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode the buffer as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), RasterError> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| RasterError::Save {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            "raster: wrote {}x{} to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }

    /// Paint `rect` in the foreground color, limited to the clip.
    fn paint(&mut self, rect: Rect) {
        let area = rect.normalized().intersect(&self.clip);
        if area.is_empty() {
            return;
        }
        let color = Rgba(self.foreground.to_rgba());
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                self.image.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    /// Pen stamp of the current line width centered on `(x, y)`.
    fn stamp(&mut self, x: i32, y: i32) {
        let w = i32::try_from(self.line.width.max(1)).unwrap_or(i32::MAX);
        let left = x.saturating_sub((w - 1) / 2);
        let top = y.saturating_sub((w - 1) / 2);
        self.paint(Rect::new(left, top, left.saturating_add(w), top.saturating_add(w)));
    }

    /// Inked boxes of `chars` starting at `pen`; returns the pen after the
    /// last advance.
    fn paint_glyphs(&mut self, font: &NativeFont, pen: Point, chars: &[NativeChar]) -> Point {
        let mut x = pen.x;
        for &c in chars {
            let m = font.metrics(c);
            if m.has_ink() {
                self.paint(Rect::new(
                    x.saturating_add(i32::from(m.lbearing)),
                    pen.y.saturating_sub(i32::from(m.ascent)),
                    x.saturating_add(i32::from(m.rbearing)),
                    pen.y.saturating_add(i32::from(m.descent)),
                ));
            }
            x = x.saturating_add(i32::from(m.width));
        }
        Point::new(x, pen.y)
    }

    /// Horizontal lines cut to the columns a stamp can reach inside the
    /// clip. Other lines pass through.
    fn trim_horizontal(&self, from: Point, to: Point) -> (Point, Point) {
        if from.y != to.y {
            return (from, to);
        }
        let reach = i32::try_from(self.line.width.max(1)).unwrap_or(i32::MAX);
        let lo = self.clip.left.saturating_sub(reach);
        let hi = self.clip.right.saturating_add(reach).max(lo);
        let cut = |p: Point| Point::new(p.x.max(lo).min(hi), p.y);
        (cut(from), cut(to))
    }
}

impl Surface for PixelSurface {
    fn set_foreground(&mut self, color: Rgb) {
        self.foreground = color;
    }

    fn set_clip(&mut self, clip: Rect) {
        self.clip = clip.normalized().intersect(&self.bounds());
    }

    fn fill_rectangle(&mut self, rect: Rect) {
        self.paint(rect);
    }

    fn set_line_attributes(&mut self, attrs: LineAttributes) {
        self.line = attrs;
    }

    /// Bresenham between the endpoints, stamping the line width at each
    /// step.
    fn draw_line(&mut self, from: Point, to: Point) {
        let (from, to) = self.trim_horizontal(from, to);
        let dx = (i64::from(to.x) - i64::from(from.x)).abs();
        let dy = -(i64::from(to.y) - i64::from(from.y)).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        loop {
            self.stamp(x, y);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_string(
        &mut self,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
        _format: CharFormat,
    ) {
        self.paint_glyphs(font, origin, chars);
    }

    fn draw_text(
        &mut self,
        font: &NativeFont,
        origin: Point,
        chars: &[NativeChar],
        items: &[TextItem],
        _format: CharFormat,
    ) {
        let mut pen = origin;
        for item in items {
            pen.x = pen.x.saturating_add(item.delta);
            pen = self.paint_glyphs(font, pen, item.chars(chars));
        }
    }
}

#[cfg(test)]
mod tests;
