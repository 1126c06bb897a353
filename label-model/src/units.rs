//! Conversions between millimetres, screen pixels and printer dots.
//!
//! None of these functions clamp. Callers that must not see negative
//! coordinates clamp before converting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LabelError;

pub const MM_PER_INCH: f64 = 25.4;

/// Pixels per inch of a density-1.0 display.
pub const BASELINE_PX_PER_INCH: f64 = 160.;

/// Print head resolution of a label printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Dpi {
    #[default]
    Dpi203,
    Dpi300,
    Dpi600,
}

impl Dpi {
    pub const ALL: [Dpi; 3] = [Dpi::Dpi203, Dpi::Dpi300, Dpi::Dpi600];

    pub fn dots_per_inch(self) -> u32 {
        match self {
            Dpi::Dpi203 => 203,
            Dpi::Dpi300 => 300,
            Dpi::Dpi600 => 600,
        }
    }

    /// Width of a single dot in millimetres.
    pub fn dot_mm(self) -> f64 {
        MM_PER_INCH / self.dots_per_inch() as f64
    }
}

impl TryFrom<i64> for Dpi {
    type Error = LabelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            203 => Ok(Dpi::Dpi203),
            300 => Ok(Dpi::Dpi300),
            600 => Ok(Dpi::Dpi600),
            other => Err(LabelError::UnsupportedDpi(other)),
        }
    }
}

impl TryFrom<u32> for Dpi {
    type Error = LabelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Dpi::try_from(value as i64)
    }
}

impl From<Dpi> for i64 {
    fn from(value: Dpi) -> Self {
        value.dots_per_inch() as i64
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dots_per_inch())
    }
}

/// `round(mm * dpi / 25.4)`, halves rounded away from zero.
pub fn mm_to_dots(mm: f64, dpi: Dpi) -> i32 {
    (mm * dpi.dots_per_inch() as f64 / MM_PER_INCH).round() as i32
}

pub fn dots_to_mm(dots: i32, dpi: Dpi) -> f64 {
    dots as f64 * MM_PER_INCH / dpi.dots_per_inch() as f64
}

fn px_per_mm(density: f64) -> f64 {
    density * BASELINE_PX_PER_INCH / MM_PER_INCH
}

pub fn mm_to_px(mm: f64, density: f64) -> f64 {
    mm * px_per_mm(density)
}

pub fn px_to_mm(px: f64, density: f64) -> f64 {
    px / px_per_mm(density)
}
