//! Scene configuration unit tests.

use super::*;
use textout_core::font::{FontProperty, NativeChar};

#[test]
fn default_scene_roundtrip() {
    let scene = SceneConfig::default();
    let toml_str = toml::to_string_pretty(&scene).expect("serialize");
    let parsed = SceneConfig::parse(&toml_str).expect("deserialize");
    assert_eq!(parsed.surface.width, 320);
    assert_eq!(parsed.surface.height, 120);
    assert_eq!(parsed.font.ascent, 12);
    assert_eq!(parsed.font.descent, 4);
    assert_eq!(parsed.font.code_page, CodePageConfig::Latin1);
    assert_eq!(parsed.context.horizontal, HorizontalConfig::Left);
    assert_eq!(parsed.context.vertical, VerticalConfig::Top);
    assert_eq!(parsed.context.background_mode, BackgroundConfig::Opaque);
    assert!(parsed.draw.is_empty());
}

#[test]
fn empty_toml_gives_defaults() {
    let parsed = SceneConfig::parse("").expect("deserialize");
    assert_eq!(parsed.font.char_width, 8);
    assert_eq!(parsed.font.break_char, b' ');
    assert!((parsed.font.rescale - 1.0).abs() < f64::EPSILON);
    assert_eq!(parsed.context.transform, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn partial_toml_uses_defaults() {
    let toml_str = r##"
[font]
ascent = 20

[context]
vertical = "baseline"
foreground = "#ff0000"
"##;
    let parsed = SceneConfig::parse(toml_str).expect("deserialize");
    assert_eq!(parsed.font.ascent, 20);
    assert_eq!(parsed.font.descent, 4);
    assert_eq!(parsed.context.vertical, VerticalConfig::Baseline);
    assert_eq!(parsed.context.horizontal, HorizontalConfig::Left);
    assert_eq!(parsed.surface.width, 320);
}

#[test]
fn draw_requests_from_toml() {
    let toml_str = r##"
[[draw]]
x = 10
y = 20
text = "Hello"

[[draw]]
x = 5
y = 40
text = "Boxed"
opaque = true
clipped = true
rect = [0, 30, 60, 50]
advances = [9, 9, 9, 9, 9]
color = "#00f"
"##;
    let parsed = SceneConfig::parse(toml_str).expect("deserialize");
    assert_eq!(parsed.draw.len(), 2);
    assert_eq!(parsed.draw[0].text, "Hello");
    assert!(!parsed.draw[0].opaque);
    assert!(parsed.draw[0].rect.is_none());
    let boxed = &parsed.draw[1];
    assert!(boxed.opaque && boxed.clipped);
    assert_eq!(boxed.rect, Some([0, 30, 60, 50]));
    assert_eq!(boxed.advances.as_deref(), Some(&[9, 9, 9, 9, 9][..]));
    assert_eq!(boxed.color.as_deref(), Some("#00f"));
}

#[test]
fn unknown_enum_value_is_a_parse_error() {
    let err = SceneConfig::parse("[context]\nhorizontal = \"middle\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn parse_hex_color_variants() {
    assert_eq!(parse_hex_color("#102030"), Some(Rgb::new(0x10, 0x20, 0x30)));
    assert_eq!(parse_hex_color("102030"), Some(Rgb::new(0x10, 0x20, 0x30)));
    assert_eq!(parse_hex_color("#fff"), Some(Rgb::WHITE));
    assert_eq!(parse_hex_color("#a1b"), Some(Rgb::new(0xaa, 0x11, 0xbb)));
    assert_eq!(parse_hex_color("#12345"), None);
    assert_eq!(parse_hex_color("#gg0000"), None);
    assert_eq!(parse_hex_color("#ééé"), None);
}

#[test]
fn bad_color_names_the_field() {
    let scene = SceneConfig::parse("[context]\nbackground = \"navy\"\n").expect("deserialize");
    let err = scene.context.build(100, 100).unwrap_err();
    match err {
        ConfigError::Color { field, value } => {
            assert_eq!(field, "context.background");
            assert_eq!(value, "navy");
        }
        other => panic!("expected color error, got {other:?}"),
    }
}

#[test]
fn singular_transform_rejected() {
    let scene =
        SceneConfig::parse("[context]\ntransform = [1.0, 2.0, 2.0, 4.0, 0.0, 0.0]\n").expect("deserialize");
    let err = scene.context.build(100, 100).unwrap_err();
    assert!(matches!(err, ConfigError::SingularTransform(_)));
}

#[test]
fn context_build_applies_state() {
    let toml_str = r##"
[context]
origin = [10, 5]
transform = [2.0, 0.0, 0.0, 2.0, 1.0, 1.0]
horizontal = "right"
vertical = "bottom"
update_cp = true
cursor = [3, 4]
background_mode = "transparent"
background = "#101010"
foreground = "#202020"
char_extra = 1
justify = [7, 2]
"##;
    let scene = SceneConfig::parse(toml_str).expect("deserialize");
    let dc = scene.context.build(200, 100).expect("context");

    assert_eq!(dc.origin(), Point::new(10, 5));
    assert_eq!(dc.lp_to_dp(Point::new(1, 1)), Point::new(3, 3));
    assert_eq!(
        dc.text_align,
        TextAlign::new(HorizontalAlign::Right, VerticalAlign::Bottom).with_update_cp()
    );
    assert_eq!(dc.cursor(), Point::new(3, 4));
    assert_eq!(dc.background_mode, BackgroundMode::Transparent);
    assert_eq!(dc.background_color, Rgb::new(0x10, 0x10, 0x10));
    assert_eq!(dc.text_color, Rgb::new(0x20, 0x20, 0x20));
    assert_eq!(dc.char_extra, 1);
    assert_eq!(dc.break_extra, 3);
    assert_eq!(dc.break_rem, 1);
    // Whole surface stays drawable after the origin shift.
    assert_eq!(dc.drawable_clip(), Rect::new(0, 0, 200, 100));
}

#[test]
fn font_build_uses_width_overrides() {
    let toml_str = r#"
[font]
char_width = 8
widths = [["i", 3], ["W", 12]]
"#;
    let scene = SceneConfig::parse(toml_str).expect("deserialize");
    let font = scene.font.build().expect("font");
    let native = font.native();
    assert_eq!(native.metrics(NativeChar::single(b'i')).width, 3);
    assert_eq!(native.metrics(NativeChar::single(b'W')).width, 12);
    assert_eq!(native.metrics(NativeChar::single(b'a')).width, 8);
    assert!(native.metrics(NativeChar::single(b'a')).has_ink());
    assert!(!native.metrics(NativeChar::single(b' ')).has_ink());
    // 8 px of a 16 px em.
    assert_eq!(native.metrics(NativeChar::single(b'a')).attributes, 500);
}

#[test]
fn font_build_flags_and_properties() {
    let toml_str = r#"
[font]
underline = true
strikeout = true
underline_position = 3
underline_thickness = 2
"#;
    let scene = SceneConfig::parse(toml_str).expect("deserialize");
    let font = scene.font.build().expect("font");
    assert_eq!(font.flags(), FontFlags::UNDERLINE | FontFlags::STRIKEOUT);
    assert_eq!(font.native().property(FontProperty::UnderlinePosition), Some(3));
    assert_eq!(font.underline_metrics().thickness, 2);
    assert!(font.rotation().is_none());
}

#[test]
fn font_build_rotation_from_escapement() {
    let scene = SceneConfig::parse("[font]\nescapement = 900\npixel_size = 20.0\n")
        .expect("deserialize");
    let font = scene.font.build().expect("font");
    let t = font.rotation().expect("rotated");
    assert!((t.pixel_size - 20.0).abs() < f64::EPSILON);
    assert!((t.b - 20.0).abs() < 1e-9);
    // 12/16 of the em above the baseline.
    assert_eq!(t.raw_ascent, 750);
    assert_eq!(font.ascent(), 15);
}

#[test]
fn full_turn_is_not_rotated() {
    let scene = SceneConfig::parse("[font]\nescapement = 3600\n").expect("deserialize");
    assert!(scene.font.build().expect("font").rotation().is_none());
}

#[test]
fn zero_em_rejected() {
    let scene = SceneConfig::parse("[font]\npixel_size = 0.0\n").expect("deserialize");
    assert!(matches!(
        scene.font.build().unwrap_err(),
        ConfigError::PixelSize(_)
    ));
}

#[test]
fn two_byte_font_from_ranges() {
    let toml_str = r#"
[font]
code_page = "ucs2"
byte1 = [0, 1]
byte2 = [0, 255]
"#;
    let scene = SceneConfig::parse(toml_str).expect("deserialize");
    let font = scene.font.build().expect("font");
    assert_eq!(font.code_page(), CodePage::Ucs2);
    assert!(font.native().is_two_byte());
    assert!(font.native().contains(NativeChar::from_code(0x0101)));
    assert!(!font.native().contains(NativeChar::from_code(0x0201)));
}

#[test]
fn load_reports_missing_file() {
    let err = SceneConfig::load(Path::new("/nonexistent/scene.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/scene.toml"));
}
