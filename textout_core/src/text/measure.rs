//! Measuring the device extent of a run.

use log::trace;

use super::{TextError, layout_chars};
use crate::dc::DeviceContext;
use crate::font::FontObject;
use crate::geometry::Size;

/// Width and height `text` would occupy in device units under the current
/// font, transform, and spacing. A trailing line feed is ignored.
pub fn text_extent(dc: &DeviceContext, font: &FontObject, text: &str) -> Result<Size, TextError> {
    measure_chars(dc, font, &layout_chars(text))
}

/// Measure an already-trimmed run.
pub(crate) fn measure_chars(
    dc: &DeviceContext,
    font: &FontObject,
    chars: &[char],
) -> Result<Size, TextError> {
    let encoding = font.encoding();
    let native_font = font.native();
    let native = encoding
        .to_native(native_font, chars)
        .map_err(TextError::Measure)?;
    let count = native.len() as f64;
    let spacing = f64::from(dc.break_rem) + count * f64::from(dc.char_extra);

    let (width, height) = match font.rotation() {
        None => {
            let ext = encoding.text_extents(native_font, &native);
            let xf = dc.world_to_device();
            (
                ((f64::from(ext.width) + spacing) * xf.m11).abs(),
                (f64::from(native_font.ascent + native_font.descent) * xf.m22).abs(),
            )
        }
        Some(t) => {
            let em = t.pixel_size / 1000.0;
            let advance: f64 = native
                .iter()
                .map(|&c| f64::from(native_font.metrics(c).attributes))
                .sum::<f64>()
                * em;
            let tall = f64::from(t.raw_ascent + t.raw_descent) * em;
            let xf = dc.device_to_world();
            (
                ((advance + spacing) * xf.m11).abs(),
                (tall * xf.m22).abs(),
            )
        }
    };

    let size = Size::new(
        (width * font.rescale()).round() as i32,
        (height * font.rescale()).round() as i32,
    );
    trace!("text_extent: {} chars -> {size:?}", chars.len());
    Ok(size)
}
