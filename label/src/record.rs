use label_model::{Dpi, LabelDesign, PaperSize};
use serde::{Deserialize, Serialize};

use crate::CodecError;

/// What the label store keeps per design. The command streams are opaque
/// to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    pub name: String,
    #[serde(default)]
    pub dpi: Dpi,
    #[serde(default = "default_paper_width")]
    pub paper_width_mm: f64,
    #[serde(default = "default_paper_height")]
    pub paper_height_mm: f64,
    pub zpl: String,
    pub pgl: String,
}

fn default_paper_width() -> f64 {
    PaperSize::default().width_mm
}

fn default_paper_height() -> f64 {
    PaperSize::default().height_mm
}

impl DesignRecord {
    pub fn paper(&self) -> PaperSize {
        PaperSize::new(self.paper_width_mm, self.paper_height_mm)
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Reads a design document, validating every element.
pub fn design_from_json(json: &str) -> Result<LabelDesign, CodecError> {
    Ok(serde_json::from_str(json)?)
}
