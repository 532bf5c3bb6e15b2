//! Visible-region stack.
//!
//! The visible region is a single device-space rectangle relative to the
//! device origin. Clipped text output saves it, intersects it with the
//! request rectangle, and restores the saved copy before returning.

use log::warn;

use crate::geometry::Rect;

/// Current visible rectangle plus the saved copies beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipStack {
    visible: Rect,
    saved: Vec<Rect>,
}

impl ClipStack {
    /// Create a stack whose visible region covers `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            visible: bounds.normalized(),
            saved: Vec::new(),
        }
    }

    /// The current visible rectangle.
    pub fn visible(&self) -> Rect {
        self.visible
    }

    /// Number of saved regions.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Push a copy of the visible region. Returns the new depth.
    pub fn save(&mut self) -> usize {
        self.saved.push(self.visible);
        self.saved.len()
    }

    /// Narrow the visible region to its overlap with `rect`.
    pub fn intersect(&mut self, rect: Rect) {
        self.visible = self.visible.intersect(&rect.normalized());
    }

    /// Pop the most recent save. Returns `false` when nothing was saved.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(rect) => {
                self.visible = rect;
                true
            }
            None => {
                warn!("clip: restore without matching save");
                false
            }
        }
    }
}
