//! Raster surface unit tests.

use super::*;
use textout_core::font::{CharMetrics, CodePage, FontId};
use textout_core::{
    BackgroundMode, DeviceContext, DrawRequest, FontObject, HorizontalAlign, TextAlign,
    TextError, TextOutFlags, VerticalAlign, ext_text_out,
};

const BG: Rgb = Rgb::WHITE;
const INK: Rgb = Rgb::BLACK;

/// 4x6 cells (ascent 4, descent 2), spaces blank.
fn font() -> NativeFont {
    let table = (0..=u8::MAX)
        .map(|b| {
            if b <= b' ' {
                CharMetrics::blank(4, 500)
            } else {
                CharMetrics::cell(4, 4, 2, 500)
            }
        })
        .collect();
    NativeFont::new(FontId(7), 4, 2, CharMetrics::cell(4, 4, 2, 500))
        .with_per_char(table)
        .expect("table matches range")
}

fn chars(s: &str) -> Vec<NativeChar> {
    s.bytes().map(NativeChar::single).collect()
}

fn surface() -> PixelSurface {
    let mut s = PixelSurface::new(40, 20, BG);
    s.set_foreground(INK);
    s
}

#[test]
fn new_surface_is_cleared() {
    let s = PixelSurface::new(8, 4, Rgb::new(1, 2, 3));
    assert_eq!(s.count(Rgb::new(1, 2, 3)), 32);
    assert_eq!(s.pixel(7, 3), Some(Rgb::new(1, 2, 3)));
    assert_eq!(s.pixel(8, 0), None);
    assert_eq!(s.pixel(-1, 0), None);
}

#[test]
fn fill_is_clipped() {
    let mut s = surface();
    s.set_clip(Rect::new(2, 2, 6, 5));
    s.fill_rectangle(Rect::new(0, 0, 40, 20));
    assert_eq!(s.count(INK), 12);
    assert_eq!(s.pixel(2, 2), Some(INK));
    assert_eq!(s.pixel(6, 2), Some(BG));
}

#[test]
fn clip_is_limited_to_bounds() {
    let mut s = surface();
    s.set_clip(Rect::new(-100, -100, 100, 100));
    s.fill_rectangle(Rect::new(-5, -5, 100, 100));
    assert_eq!(s.count(INK), 40 * 20);
}

#[test]
fn inverted_fill_is_normalized() {
    let mut s = surface();
    s.fill_rectangle(Rect::new(4, 4, 2, 2));
    assert_eq!(s.count(INK), 4);
}

#[test]
fn string_paints_ink_boxes_above_and_below_baseline() {
    let mut s = surface();
    s.draw_string(&font(), Point::new(2, 10), &chars("a b"), CharFormat::Byte);
    // Two inked 4x6 cells, the space between them is blank.
    assert_eq!(s.count(INK), 48);
    assert_eq!(s.pixel(2, 6), Some(INK));
    assert_eq!(s.pixel(2, 5), Some(BG));
    assert_eq!(s.pixel(2, 11), Some(INK));
    assert_eq!(s.pixel(2, 12), Some(BG));
    assert_eq!(s.pixel(6, 8), Some(BG));
    assert_eq!(s.pixel(10, 8), Some(INK));
}

#[test]
fn text_items_shift_by_delta() {
    let mut s = surface();
    let items = [
        TextItem {
            start: 0,
            len: 1,
            delta: 0,
        },
        TextItem {
            start: 1,
            len: 1,
            delta: 3,
        },
    ];
    s.draw_text(&font(), Point::new(0, 10), &chars("ab"), &items, CharFormat::Byte);
    assert_eq!(s.pixel(3, 8), Some(INK));
    assert_eq!(s.pixel(4, 8), Some(BG));
    assert_eq!(s.pixel(6, 8), Some(BG));
    assert_eq!(s.pixel(7, 8), Some(INK));
    assert_eq!(s.pixel(10, 8), Some(INK));
    assert_eq!(s.pixel(11, 8), Some(BG));
}

#[test]
fn thin_horizontal_line() {
    let mut s = surface();
    s.draw_line(Point::new(1, 3), Point::new(10, 3));
    assert_eq!(s.count(INK), 10);
    assert_eq!(s.pixel(10, 3), Some(INK));
}

#[test]
fn thick_line_stamps_width() {
    let mut s = surface();
    s.set_line_attributes(LineAttributes::decoration(3));
    s.draw_line(Point::new(5, 5), Point::new(9, 5));
    assert_eq!(s.count(INK), 7 * 3);
    assert_eq!(s.pixel(5, 4), Some(INK));
    assert_eq!(s.pixel(5, 6), Some(INK));
    assert_eq!(s.pixel(5, 7), Some(BG));
}

#[test]
fn diagonal_line_hits_both_ends() {
    let mut s = surface();
    s.draw_line(Point::new(10, 10), Point::new(0, 0));
    assert_eq!(s.count(INK), 11);
    assert_eq!(s.pixel(0, 0), Some(INK));
    assert_eq!(s.pixel(5, 5), Some(INK));
}

#[test]
fn far_item_delta_paints_nothing() {
    let mut s = surface();
    let items = [TextItem {
        start: 0,
        len: 2,
        delta: i32::MAX - 2,
    }];
    s.draw_text(&font(), Point::new(10, 10), &chars("ab"), &items, CharFormat::Byte);
    assert_eq!(s.count(INK), 0);
}

#[test]
fn horizontal_line_spanning_the_coordinate_range() {
    let mut s = surface();
    s.draw_line(Point::new(i32::MIN, 3), Point::new(i32::MAX, 3));
    assert_eq!(s.count(INK), 40);
    assert_eq!(s.pixel(0, 3), Some(INK));
    assert_eq!(s.pixel(39, 3), Some(INK));
}

fn context() -> DeviceContext {
    let mut dc = DeviceContext::new(Point::default(), Rect::new(0, 0, 40, 20));
    dc.text_align = TextAlign::new(HorizontalAlign::Left, VerticalAlign::Baseline);
    dc.background_mode = BackgroundMode::Transparent;
    dc
}

#[test]
fn clipped_request_without_rect_leaves_pixels_untouched() {
    let mut s = PixelSurface::new(40, 20, BG);
    let mut dc = context();
    let font = FontObject::new(font(), CodePage::Latin1);
    let req = DrawRequest::new(Point::new(2, 10), "abc").with_flags(TextOutFlags::CLIPPED);
    let err = ext_text_out(&mut dc, &font, &mut s, &req).unwrap_err();
    assert_eq!(err, TextError::ClipWithoutRect);
    assert_eq!(s.count(BG), 40 * 20);
}

#[test]
fn clipped_text_stays_inside_rect() {
    let mut s = PixelSurface::new(40, 20, BG);
    let mut dc = context();
    let font = FontObject::new(font(), CodePage::Latin1);
    let req = DrawRequest::new(Point::new(0, 10), "abcdefgh")
        .with_flags(TextOutFlags::CLIPPED)
        .with_rect(Rect::new(5, 7, 15, 20));
    ext_text_out(&mut dc, &font, &mut s, &req).expect("draw");

    // Columns 5..15, rows 7..12.
    assert_eq!(s.count(INK), 10 * 5);
    assert_eq!(s.pixel(4, 8), Some(BG));
    assert_eq!(s.pixel(15, 8), Some(BG));
    assert_eq!(s.pixel(8, 6), Some(BG));

    // The clip is lifted for later draws.
    s.set_foreground(INK);
    s.fill_rectangle(Rect::new(0, 0, 1, 1));
    assert_eq!(s.pixel(0, 0), Some(INK));
}

#[test]
fn opaque_request_fills_background_then_glyphs() {
    let mut s = PixelSurface::new(40, 20, BG);
    let mut dc = context();
    dc.text_align.vertical = VerticalAlign::Top;
    dc.background_color = Rgb::new(0xcc, 0, 0);
    let font = FontObject::new(font(), CodePage::Latin1);
    let req = DrawRequest::new(Point::new(0, 10), "a b").with_flags(TextOutFlags::OPAQUE);
    ext_text_out(&mut dc, &font, &mut s, &req).expect("draw");

    // Top-aligned so the measured box and the glyph cells coincide.
    assert_eq!(s.count(INK), 48);
    assert_eq!(s.count(Rgb::new(0xcc, 0, 0)), 24);
}

#[test]
fn png_roundtrip() {
    let mut s = surface();
    s.fill_rectangle(Rect::new(0, 0, 3, 3));
    let path = std::env::temp_dir().join(format!("textout-raster-{}.png", std::process::id()));
    s.save_png(&path).expect("save");
    let loaded = image::open(&path).expect("open").to_rgba8();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded.dimensions(), (40, 20));
    assert_eq!(loaded, s.into_image());
}

#[test]
fn save_into_missing_directory_fails() {
    let s = surface();
    let err = s
        .save_png(Path::new("/nonexistent-dir/out.png"))
        .unwrap_err();
    assert!(matches!(err, RasterError::Save { .. }));
}
