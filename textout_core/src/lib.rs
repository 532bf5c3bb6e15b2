//! Device-independent text output.
//!
//! This crate positions, clips, and draws runs of text through a device
//! context onto a [`Surface`]: world-to-device mapping, alignment, current
//! position updates, explicit per-character advances, inter-character and
//! justification spacing, rotated fonts, and underline/strike-out
//! decorations. It performs no pixel work of its own; surfaces decide how
//! primitives become pixels.

#![deny(unsafe_code)]

pub mod color;
pub mod dc;
pub mod font;
pub mod geometry;
pub mod surface;
pub mod text;
pub mod xform;

pub use color::Rgb;
pub use dc::{BackgroundMode, DeviceContext, HorizontalAlign, TextAlign, VerticalAlign};
pub use font::{CodePage, FontFlags, FontObject, NativeFont, RotationTransform};
pub use geometry::{Point, Rect, Size};
pub use surface::{DrawOp, RecordingSurface, Surface};
pub use text::{DrawRequest, TextError, TextOutFlags, ext_text_out, text_extent};
pub use xform::Xform;
