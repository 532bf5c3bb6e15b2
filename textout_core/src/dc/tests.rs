use super::{ClipStack, DeviceContext};
use crate::geometry::{Point, Rect};
use crate::xform::Xform;

fn dc() -> DeviceContext {
    DeviceContext::new(Point::new(5, 7), Rect::new(0, 0, 100, 50))
}

#[test]
fn new_context_has_identity_transform() {
    let dc = dc();
    assert_eq!(*dc.world_to_device(), Xform::IDENTITY);
    assert_eq!(dc.lp_to_dp(Point::new(3, 4)), Point::new(3, 4));
}

#[test]
fn singular_transform_is_rejected() {
    let mut dc = dc();
    let scaled = Xform::scale_translate(2.0, 2.0, 0.0, 0.0);
    assert!(dc.set_world_transform(scaled));
    assert!(!dc.set_world_transform(Xform::scale_translate(0.0, 0.0, 0.0, 0.0)));
    assert_eq!(*dc.world_to_device(), scaled);
}

#[test]
fn dp_to_lp_inverts_lp_to_dp() {
    let mut dc = dc();
    dc.set_world_transform(Xform::scale_translate(2.0, 4.0, 3.0, 1.0));
    let p = Point::new(9, -2);
    assert_eq!(dc.dp_to_lp(dc.lp_to_dp(p)), p);
}

#[test]
fn drawable_clip_includes_origin() {
    assert_eq!(dc().drawable_clip(), Rect::new(5, 7, 105, 57));
}

#[test]
fn justification_splits_extra_and_remainder() {
    let mut dc = dc();
    dc.set_text_justification(11, 3);
    assert_eq!(dc.break_extra, 3);
    assert_eq!(dc.break_rem, 2);

    dc.set_text_justification(11, 0);
    assert_eq!(dc.break_extra, 0);
    assert_eq!(dc.break_rem, 0);
}

#[test]
fn clip_save_intersect_restore() {
    let mut clip = ClipStack::new(Rect::new(0, 0, 100, 100));
    assert_eq!(clip.save(), 1);
    clip.intersect(Rect::new(50, 60, 10, 20));
    assert_eq!(clip.visible(), Rect::new(10, 20, 50, 60));
    assert!(clip.restore());
    assert_eq!(clip.visible(), Rect::new(0, 0, 100, 100));
    assert_eq!(clip.depth(), 0);
}

#[test]
fn restore_without_save_is_refused() {
    let mut clip = ClipStack::new(Rect::new(0, 0, 10, 10));
    assert!(!clip.restore());
    assert_eq!(clip.visible(), Rect::new(0, 0, 10, 10));
}
