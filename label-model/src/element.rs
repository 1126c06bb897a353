use serde::{Deserialize, Serialize};

use crate::{LabelError, PaperSize, Rect};

/// Nominal text size used when nothing else is known, in dots.
pub const DEFAULT_TEXT_DOTS: u32 = 30;

/// Largest nominal text size accepted, in dots.
pub const MAX_TEXT_DOTS: u32 = 4096;

/// Grid line thickness of a table when none is given, in dots.
pub const DEFAULT_LINE_THICKNESS_DOTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinearSymbology {
    #[default]
    Code128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatrixSymbology {
    #[default]
    Qr,
}

/// Any symbology the sizing engine knows how to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Linear(LinearSymbology),
    Matrix(MatrixSymbology),
}

impl From<LinearSymbology> for Symbology {
    fn from(value: LinearSymbology) -> Self {
        Symbology::Linear(value)
    }
}

impl From<MatrixSymbology> for Symbology {
    fn from(value: MatrixSymbology) -> Self {
        Symbology::Matrix(value)
    }
}

fn default_text_dots() -> u32 {
    DEFAULT_TEXT_DOTS
}

fn default_magnification() -> u32 {
    1
}

fn default_line_thickness() -> u32 {
    DEFAULT_LINE_THICKNESS_DOTS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub content: String,
    pub x_mm: f64,
    pub y_mm: f64,
    #[serde(default = "default_text_dots")]
    pub nominal_height_dots: u32,
    #[serde(default = "default_text_dots")]
    pub nominal_width_dots: u32,
}

impl TextElement {
    pub fn new(content: impl Into<String>, x_mm: f64, y_mm: f64) -> Self {
        Self {
            content: content.into(),
            x_mm,
            y_mm,
            nominal_height_dots: DEFAULT_TEXT_DOTS,
            nominal_width_dots: DEFAULT_TEXT_DOTS,
        }
    }

    pub fn with_size(mut self, height_dots: u32, width_dots: u32) -> Self {
        self.nominal_height_dots = height_dots;
        self.nominal_width_dots = width_dots;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barcode1D {
    pub payload: String,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    #[serde(default)]
    pub symbology: LinearSymbology,
}

impl Barcode1D {
    pub fn code128(
        payload: impl Into<String>,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    ) -> Self {
        Self {
            payload: payload.into(),
            x_mm,
            y_mm,
            width_mm,
            height_mm,
            symbology: LinearSymbology::Code128,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barcode2D {
    pub payload: String,
    pub x_mm: f64,
    pub y_mm: f64,
    pub size_mm: f64,
    /// Last realized magnification. Serialization refits it from `size_mm`.
    #[serde(default = "default_magnification")]
    pub magnification: u32,
    #[serde(default)]
    pub symbology: MatrixSymbology,
}

impl Barcode2D {
    pub fn qr(payload: impl Into<String>, x_mm: f64, y_mm: f64, size_mm: f64) -> Self {
        Self {
            payload: payload.into(),
            x_mm,
            y_mm,
            size_mm,
            magnification: 1,
            symbology: MatrixSymbology::Qr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub x_mm: f64,
    pub y_mm: f64,
    pub rows: u32,
    pub cols: u32,
    pub cell_width_mm: f64,
    pub cell_height_mm: f64,
    #[serde(default = "default_line_thickness")]
    pub line_thickness_dots: u32,
}

impl Table {
    pub fn new(
        x_mm: f64,
        y_mm: f64,
        rows: u32,
        cols: u32,
        cell_width_mm: f64,
        cell_height_mm: f64,
    ) -> Self {
        Self {
            x_mm,
            y_mm,
            rows,
            cols,
            cell_width_mm,
            cell_height_mm,
            line_thickness_dots: DEFAULT_LINE_THICKNESS_DOTS,
        }
    }

    pub fn width_mm(&self) -> f64 {
        self.cols as f64 * self.cell_width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.rows as f64 * self.cell_height_mm
    }
}

/// One printable item of a label. List order is stacking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Barcode1D(Barcode1D),
    Barcode2D(Barcode2D),
    Table(Table),
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Barcode1D(_) => "barcode1d",
            Element::Barcode2D(_) => "barcode2d",
            Element::Table(_) => "table",
        }
    }

    pub fn origin_mm(&self) -> (f64, f64) {
        match self {
            Element::Text(t) => (t.x_mm, t.y_mm),
            Element::Barcode1D(b) => (b.x_mm, b.y_mm),
            Element::Barcode2D(b) => (b.x_mm, b.y_mm),
            Element::Table(t) => (t.x_mm, t.y_mm),
        }
    }

    pub fn set_origin_mm(&mut self, x_mm: f64, y_mm: f64) {
        let (x, y) = match self {
            Element::Text(t) => (&mut t.x_mm, &mut t.y_mm),
            Element::Barcode1D(b) => (&mut b.x_mm, &mut b.y_mm),
            Element::Barcode2D(b) => (&mut b.x_mm, &mut b.y_mm),
            Element::Table(t) => (&mut t.x_mm, &mut t.y_mm),
        };
        *x = x_mm;
        *y = y_mm;
    }

    /// Size in millimetres, when the model records one. Text size depends
    /// on the font and is only known after rendering.
    pub fn extent_mm(&self) -> Option<(f64, f64)> {
        match self {
            Element::Text(_) => None,
            Element::Barcode1D(b) => Some((b.width_mm, b.height_mm)),
            Element::Barcode2D(b) => Some((b.size_mm, b.size_mm)),
            Element::Table(t) => Some((t.width_mm(), t.height_mm())),
        }
    }

    pub fn footprint_mm(&self, text_extent: (f64, f64)) -> Rect {
        let (x, y) = self.origin_mm();
        let (width, height) = self.extent_mm().unwrap_or(text_extent);
        Rect::new(x, y, width, height)
    }

    /// Keeps the element on the paper, see [`Rect::clamp_within`].
    pub fn clamp_to(&mut self, paper: &PaperSize, text_extent: (f64, f64)) {
        let clamped = paper.clamp(self.footprint_mm(text_extent));
        self.set_origin_mm(clamped.x, clamped.y);
    }

    pub fn validate(&self) -> Result<(), LabelError> {
        fn positive(element: &'static str, name: &str, value: f64) -> Result<(), LabelError> {
            match value > 0. && value.is_finite() {
                true => Ok(()),
                false => Err(LabelError::InvalidGeometry {
                    element,
                    reason: format!("{name} must be positive, got {value}"),
                }),
            }
        }

        let kind = self.kind();
        match self {
            Element::Text(t) => {
                if t.nominal_height_dots == 0 || t.nominal_width_dots == 0 {
                    return Err(LabelError::InvalidGeometry {
                        element: kind,
                        reason: "nominal size must be at least one dot".into(),
                    });
                }
                let largest = t.nominal_height_dots.max(t.nominal_width_dots);
                if largest > MAX_TEXT_DOTS {
                    return Err(LabelError::InvalidGeometry {
                        element: kind,
                        reason: format!("nominal size {largest} exceeds {MAX_TEXT_DOTS} dots"),
                    });
                }
            }
            Element::Barcode1D(b) => {
                if b.payload.is_empty() {
                    return Err(LabelError::EmptyPayload(kind));
                }
                positive(kind, "width", b.width_mm)?;
                positive(kind, "height", b.height_mm)?;
            }
            Element::Barcode2D(b) => {
                if b.payload.is_empty() {
                    return Err(LabelError::EmptyPayload(kind));
                }
                positive(kind, "size", b.size_mm)?;
            }
            Element::Table(t) => {
                if t.rows == 0 || t.cols == 0 {
                    return Err(LabelError::InvalidTable {
                        rows: t.rows,
                        cols: t.cols,
                    });
                }
                positive(kind, "cell width", t.cell_width_mm)?;
                positive(kind, "cell height", t.cell_height_mm)?;
            }
        }
        Ok(())
    }
}

impl From<TextElement> for Element {
    fn from(value: TextElement) -> Self {
        Element::Text(value)
    }
}

impl From<Barcode1D> for Element {
    fn from(value: Barcode1D) -> Self {
        Element::Barcode1D(value)
    }
}

impl From<Barcode2D> for Element {
    fn from(value: Barcode2D) -> Self {
        Element::Barcode2D(value)
    }
}

impl From<Table> for Element {
    fn from(value: Table) -> Self {
        Element::Table(value)
    }
}
