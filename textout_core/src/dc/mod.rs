//! Device context: the drawing state text output reads and updates.
//!
//! Holds the world/device transforms, text alignment, background mode and
//! colors, inter-character spacing, the current cursor position, and the
//! visible-region stack. Text output borrows it mutably for the whole call,
//! so no other drawing can interleave.

mod clip;

pub use clip::ClipStack;

use log::warn;

use crate::color::Rgb;
use crate::geometry::{Point, Rect};
use crate::xform::Xform;

/// Horizontal anchor of the reference point relative to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Right,
    Center,
}

/// Vertical anchor of the reference point relative to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Bottom,
    Baseline,
}

/// Text alignment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAlign {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    /// Draw at the cursor position instead of the request origin, and move
    /// the cursor past the text afterwards.
    pub update_cp: bool,
}

impl TextAlign {
    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
            update_cp: false,
        }
    }

    /// Same alignment with cursor tracking enabled.
    #[must_use]
    pub const fn with_update_cp(mut self) -> Self {
        self.update_cp = true;
        self
    }
}

/// Whether text output paints the background behind glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    Transparent,
    #[default]
    Opaque,
}

/// Drawing state for one drawable.
#[derive(Debug, Clone)]
pub struct DeviceContext {
    /// Offset of the context inside its drawable.
    origin: Point,
    world_to_device: Xform,
    device_to_world: Xform,
    pub text_align: TextAlign,
    pub background_mode: BackgroundMode,
    pub background_color: Rgb,
    pub text_color: Rgb,
    /// Extra device pixels after every character.
    pub char_extra: i32,
    /// Extra device pixels after every break character.
    pub break_extra: i32,
    /// Justification pixels left over after dividing among breaks.
    pub break_rem: i32,
    /// Current position in logical units.
    cursor: Point,
    clip: ClipStack,
}

impl DeviceContext {
    /// Create a context at `origin` whose visible region is `visible`
    /// (device space, relative to `origin`).
    pub fn new(origin: Point, visible: Rect) -> Self {
        Self {
            origin,
            world_to_device: Xform::IDENTITY,
            device_to_world: Xform::IDENTITY,
            text_align: TextAlign::default(),
            background_mode: BackgroundMode::default(),
            background_color: Rgb::WHITE,
            text_color: Rgb::BLACK,
            char_extra: 0,
            break_extra: 0,
            break_rem: 0,
            cursor: Point::default(),
            clip: ClipStack::new(visible),
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn world_to_device(&self) -> &Xform {
        &self.world_to_device
    }

    pub fn device_to_world(&self) -> &Xform {
        &self.device_to_world
    }

    /// Replace the world transform. A singular transform is rejected and the
    /// previous one kept; returns whether the new transform was installed.
    pub fn set_world_transform(&mut self, xform: Xform) -> bool {
        let Some(inverse) = xform.invert() else {
            warn!("dc: rejecting singular transform {xform:?}");
            return false;
        };
        self.world_to_device = xform;
        self.device_to_world = inverse;
        true
    }

    /// Logical to device coordinates.
    pub fn lp_to_dp(&self, p: Point) -> Point {
        self.world_to_device.map_point(p)
    }

    /// Device to logical coordinates.
    pub fn dp_to_lp(&self, p: Point) -> Point {
        self.device_to_world.map_point(p)
    }

    /// Current position in logical units.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn move_to(&mut self, p: Point) {
        self.cursor = p;
    }

    pub fn clip(&self) -> &ClipStack {
        &self.clip
    }

    pub fn clip_mut(&mut self) -> &mut ClipStack {
        &mut self.clip
    }

    /// Visible region in drawable coordinates.
    pub fn drawable_clip(&self) -> Rect {
        self.clip.visible().offset(self.origin.x, self.origin.y)
    }

    /// Spread `extra` pixels over `breaks` break characters.
    ///
    /// Each break gets `extra / breaks`; what is left becomes the break
    /// remainder used by text measurement. Zero breaks clears justification.
    pub fn set_text_justification(&mut self, extra: i32, breaks: i32) {
        if breaks == 0 {
            self.break_extra = 0;
            self.break_rem = 0;
            return;
        }
        self.break_extra = extra / breaks;
        self.break_rem = extra - breaks * self.break_extra;
    }
}

#[cfg(test)]
mod tests;
