//! Drawing a run: background fill, clipping, alignment, glyphs, and
//! decorations.
//!
//! Order matters and is observable: the request rectangle is filled before
//! anything can fail, the cursor moves during alignment, and glyph
//! conversion happens last. A failure after the fill leaves the fill in
//! place. The visible region is restored on every path that narrowed it.

use log::{debug, trace, warn};

use super::items::{advance_items, spacing_items};
use super::measure::measure_chars;
use super::{DrawRequest, TextError, TextOutFlags, layout_chars};
use crate::dc::{BackgroundMode, DeviceContext, HorizontalAlign, VerticalAlign};
use crate::font::{FontFlags, FontObject, NativeChar, RotationTransform};
use crate::geometry::{Point, Rect, Size};
use crate::surface::{LineAttributes, Surface};

/// Device-space placement of a run after alignment.
#[derive(Debug, Clone, Copy)]
struct RunLayout {
    /// Baseline start, relative to the device origin.
    pos: Point,
    /// `pos` on the surface.
    pen: Point,
    /// Unrotated run width in device pixels.
    width: i32,
    ascent: i32,
    descent: i32,
    /// Resolved request rectangle (empty when neither flag is set).
    rect: Rect,
    flags: TextOutFlags,
}

/// Draw `request` on `surface` using `dc` and `font`.
pub fn ext_text_out(
    dc: &mut DeviceContext,
    font: &FontObject,
    surface: &mut dyn Surface,
    request: &DrawRequest<'_>,
) -> Result<(), TextError> {
    let chars = layout_chars(request.text);
    let advances = match request.advances {
        Some(adv) if adv.len() < chars.len() => {
            return Err(TextError::AdvanceCount {
                expected: chars.len(),
                got: adv.len(),
            });
        }
        Some(adv) => Some(&adv[..chars.len()]),
        None => None,
    };

    trace!(
        "ext_text_out: origin={:?} flags={:?} rect={:?} text={:?} advances={}",
        request.origin,
        request.flags,
        request.rect,
        request.text,
        advances.is_some(),
    );

    let align = dc.text_align;
    let origin = if align.update_cp {
        dc.cursor()
    } else {
        request.origin
    };

    let opaque = request.flags.contains(TextOutFlags::OPAQUE);
    let clipped = request.flags.contains(TextOutFlags::CLIPPED);
    let rect = if opaque || clipped {
        resolve_rect(dc, font, request.rect, origin, &chars, clipped)?
    } else {
        Rect::default()
    };

    let mut pos = dc.lp_to_dp(origin);
    let org = dc.origin();
    trace!("ext_text_out: device pos={pos:?} rect={rect:?}");

    if opaque {
        surface.set_foreground(dc.background_color);
        surface.fill_rectangle(rect.offset(org.x, org.y));
    }
    if chars.is_empty() {
        return Ok(());
    }

    let width = match advances {
        Some(adv) => {
            let sum = adv.iter().map(|&a| i64::from(a)).sum();
            dc.world_to_device()
                .checked_scale_x(sum)
                .ok_or(TextError::CoordinateOverflow)?
        }
        None => measure_chars(dc, font, &chars)?.width,
    };
    let ascent = font.ascent();
    let descent = font.descent();
    let (xwidth, ywidth) = font.rotation().map_or((width, 0), |t| {
        let (x, y) = t.along(f64::from(width));
        (x as i32, y as i32)
    });

    match align.horizontal {
        HorizontalAlign::Left => {
            if align.update_cp {
                let end = offset_point(pos, i64::from(xwidth), -i64::from(ywidth))?;
                let cursor = dc.dp_to_lp(end);
                dc.move_to(cursor);
            }
        }
        HorizontalAlign::Right => {
            pos = offset_point(pos, -i64::from(xwidth), i64::from(ywidth))?;
            if align.update_cp {
                let cursor = dc.dp_to_lp(pos);
                dc.move_to(cursor);
            }
        }
        HorizontalAlign::Center => {
            pos = offset_point(pos, -i64::from(xwidth / 2), i64::from(ywidth / 2))?;
        }
    }

    match (align.vertical, font.rotation()) {
        (VerticalAlign::Top, None) => pos = offset_point(pos, 0, i64::from(ascent))?,
        (VerticalAlign::Top, Some(t)) => {
            let (dx, dy) = t.across(f64::from(ascent));
            pos.x = (f64::from(pos.x) - dx) as i32;
            pos.y = (f64::from(pos.y) + dy) as i32;
        }
        (VerticalAlign::Bottom, None) => pos = offset_point(pos, 0, -i64::from(descent))?,
        (VerticalAlign::Bottom, Some(t)) => {
            let (dx, dy) = t.across(f64::from(descent));
            pos.x = (f64::from(pos.x) + dx) as i32;
            pos.y = (f64::from(pos.y) - dy) as i32;
        }
        (VerticalAlign::Baseline, _) => {}
    }

    let pen = glyph_pen(pos, org, width, ascent, descent)?;

    if clipped {
        dc.clip_mut().save();
        dc.clip_mut().intersect(rect);
        surface.set_clip(dc.drawable_clip());
    }

    let layout = RunLayout {
        pos,
        pen,
        width,
        ascent,
        descent,
        rect,
        flags: request.flags,
    };
    let result = draw_run(dc, font, surface, &chars, advances, &layout);

    if clipped {
        dc.clip_mut().restore();
        surface.set_clip(dc.drawable_clip());
    }
    if let Err(err) = &result {
        warn!("ext_text_out: {err}");
    }
    result
}

/// `p` moved by `(dx, dy)`, failing when it leaves the device range.
fn offset_point(p: Point, dx: i64, dy: i64) -> Result<Point, TextError> {
    let x = i32::try_from(i64::from(p.x) + dx).map_err(|_| TextError::CoordinateOverflow)?;
    let y = i32::try_from(i64::from(p.y) + dy).map_err(|_| TextError::CoordinateOverflow)?;
    Ok(Point::new(x, y))
}

/// Surface position of the baseline start. Fails unless every edge of the
/// glyph box is representable.
fn glyph_pen(
    pos: Point,
    org: Point,
    width: i32,
    ascent: i32,
    descent: i32,
) -> Result<Point, TextError> {
    let pen = offset_point(pos, i64::from(org.x), i64::from(org.y))?;
    offset_point(pen, i64::from(width), -i64::from(ascent))?;
    offset_point(pen, 0, i64::from(descent))?;
    Ok(pen)
}

/// Device-space request rectangle, normalized.
///
/// An explicit rectangle is mapped corner by corner. Without one, an opaque
/// request fills the measured extent anchored at the device origin of the
/// text; a clipped request cannot proceed.
fn resolve_rect(
    dc: &DeviceContext,
    font: &FontObject,
    rect: Option<Rect>,
    origin: Point,
    chars: &[char],
    clipped: bool,
) -> Result<Rect, TextError> {
    let resolved = match rect {
        Some(r) => {
            let xf = dc.world_to_device();
            Rect::new(
                xf.map_x(r.left, r.top),
                xf.map_y(r.left, r.top),
                xf.map_x(r.right, r.bottom),
                xf.map_y(r.right, r.bottom),
            )
        }
        None if clipped => return Err(TextError::ClipWithoutRect),
        None => {
            let size = measure_chars(dc, font, chars)?;
            Rect::from_origin_size(dc.lp_to_dp(origin), size)
        }
    };
    Ok(resolved.normalized())
}

/// Whether the glyph background still needs painting.
///
/// A request that is both opaque and clipped already painted everything
/// that can show. An opaque request only needs the strip when the glyph
/// box pokes out of the filled rectangle.
fn needs_background_strip(layout: &RunLayout) -> bool {
    let opaque = layout.flags.contains(TextOutFlags::OPAQUE);
    let clipped = layout.flags.contains(TextOutFlags::CLIPPED);
    if opaque && clipped {
        return false;
    }
    let RunLayout {
        pos,
        width,
        ascent,
        descent,
        rect,
        ..
    } = *layout;
    let (x, y) = (i64::from(pos.x), i64::from(pos.y));
    !opaque
        || x < i64::from(rect.left)
        || x + i64::from(width) >= i64::from(rect.right)
        || y - i64::from(ascent) < i64::from(rect.top)
        || y + i64::from(descent) >= i64::from(rect.bottom)
}

/// Everything after alignment: strip fill, glyphs, decorations.
fn draw_run(
    dc: &DeviceContext,
    font: &FontObject,
    surface: &mut dyn Surface,
    chars: &[char],
    advances: Option<&[i32]>,
    layout: &RunLayout,
) -> Result<(), TextError> {
    let pen = layout.pen;

    if dc.background_mode == BackgroundMode::Opaque && needs_background_strip(layout) {
        surface.set_foreground(dc.background_color);
        surface.fill_rectangle(Rect::from_origin_size(
            Point::new(pen.x, pen.y - layout.ascent),
            Size::new(layout.width, layout.ascent.saturating_add(layout.descent)),
        ));
    }

    let encoding = font.encoding();
    let native_font = font.native();
    let native = encoding.to_native(native_font, chars)?;

    surface.set_foreground(dc.text_color);
    match font.rotation() {
        None if dc.char_extra == 0 && dc.break_extra == 0 && advances.is_none() => {
            encoding.draw_string(surface, native_font, pen, &native);
        }
        None => {
            let items = match advances {
                Some(adv) => advance_items(
                    encoding,
                    native_font,
                    &native,
                    adv,
                    dc.world_to_device().fixed_scale_x(),
                )?,
                None => spacing_items(&native, dc.char_extra, dc.break_extra, font.break_char())?,
            };
            debug!(
                "ext_text_out: {} chars split into {} items",
                native.len(),
                items.len()
            );
            encoding.draw_text(surface, native_font, pen, &native, &items);
        }
        Some(t) => draw_rotated(dc, font, surface, t, &native, advances, pen),
    }

    draw_decorations(font, surface, pen, layout.width);
    Ok(())
}

/// Glyph-by-glyph drawing along the rotated baseline.
fn draw_rotated(
    dc: &DeviceContext,
    font: &FontObject,
    surface: &mut dyn Surface,
    t: &RotationTransform,
    native: &[NativeChar],
    advances: Option<&[i32]>,
    pen: Point,
) {
    let encoding = font.encoding();
    let native_font = font.native();
    let em = t.pixel_size / 1000.0;
    let mut offset = 0.0;

    for (i, c) in native.iter().enumerate() {
        let (dx, dy) = t.along(offset);
        let at = Point::new(
            (f64::from(pen.x) + dx).round() as i32,
            (f64::from(pen.y) - dy).round() as i32,
        );
        encoding.draw_string(surface, native_font, at, std::slice::from_ref(c));

        offset += match advances {
            Some(adv) => f64::from(dc.world_to_device().scale_x(adv[i])),
            None => {
                let mut step = f64::from(native_font.metrics(*c).attributes) * em
                    + f64::from(dc.char_extra);
                if c.byte2 == font.break_char() {
                    step += f64::from(dc.break_extra);
                }
                step
            }
        };
    }
}

fn draw_decorations(font: &FontObject, surface: &mut dyn Surface, pen: Point, width: i32) {
    let flags = font.flags();
    if flags.contains(FontFlags::UNDERLINE) {
        let m = font.underline_metrics();
        let y = pen.y.saturating_add(m.position);
        surface.set_line_attributes(LineAttributes::decoration(m.thickness));
        surface.draw_line(Point::new(pen.x, y), Point::new(pen.x + width, y));
    }
    if flags.contains(FontFlags::STRIKEOUT) {
        let m = font.strikeout_metrics();
        let y = pen.y.saturating_sub(m.ascent);
        surface.set_line_attributes(LineAttributes::decoration(m.thickness()));
        surface.draw_line(Point::new(pen.x, y), Point::new(pen.x + width, y));
    }
}
