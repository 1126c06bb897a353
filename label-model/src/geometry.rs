use serde::{Deserialize, Serialize};

/// Axis aligned box. The unit is whatever the caller works in, as long as
/// the bounds it is clamped against use the same one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Moves the box so it lies inside `[0, bound_width] x [0, bound_height]`.
    /// The size is never touched: a box larger than the bounds is pinned to
    /// the origin and overhangs on the far side.
    pub fn clamp_within(self, bound_width: f64, bound_height: f64) -> Self {
        Self {
            x: self.x.max(0.).min((bound_width - self.width).max(0.)),
            y: self.y.max(0.).min((bound_height - self.height).max(0.)),
            ..self
        }
    }
}

/// Physical label stock size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PaperSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    pub fn clamp(&self, rect: Rect) -> Rect {
        rect.clamp_within(self.width_mm, self.height_mm)
    }
}

impl Default for PaperSize {
    /// A4 portrait
    fn default() -> Self {
        Self::new(210., 297.)
    }
}
