use label_barcode::{LinearFit, MatrixFit, fit_code128, fit_qr};
use label_model::{Dpi, Element, mm_to_dots};

/// Border and grid lines of a table, all in dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGeometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub thickness: u32,
    /// x of each inner vertical line
    pub verticals: Vec<u32>,
    /// y of each inner horizontal line
    pub horizontals: Vec<u32>,
}

/// An element resolved to printer dots, ready for any dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placed<'a> {
    Text {
        x: u32,
        y: u32,
        content: &'a str,
        height_dots: u32,
        width_dots: u32,
    },
    Code128 {
        x: u32,
        y: u32,
        payload: &'a str,
        fit: LinearFit,
    },
    Qr {
        x: u32,
        y: u32,
        payload: &'a str,
        fit: MatrixFit,
    },
    Table(TableGeometry),
}

impl Placed<'_> {
    pub fn origin(&self) -> (u32, u32) {
        match self {
            Placed::Text { x, y, .. } | Placed::Code128 { x, y, .. } | Placed::Qr { x, y, .. } => {
                (*x, *y)
            }
            Placed::Table(table) => (table.x, table.y),
        }
    }
}

/// Coordinates are clamped at zero; printers reject negative origins.
fn position(mm: f64, dpi: Dpi) -> u32 {
    mm_to_dots(mm, dpi).max(0) as u32
}

/// Sizes are at least one dot.
fn size(mm: f64, dpi: Dpi) -> u32 {
    mm_to_dots(mm, dpi).max(1) as u32
}

pub fn place(element: &Element, dpi: Dpi) -> Placed<'_> {
    match element {
        Element::Text(text) => Placed::Text {
            x: position(text.x_mm, dpi),
            y: position(text.y_mm, dpi),
            content: &text.content,
            height_dots: text.nominal_height_dots.max(1),
            width_dots: text.nominal_width_dots.max(1),
        },
        Element::Barcode1D(barcode) => Placed::Code128 {
            x: position(barcode.x_mm, dpi),
            y: position(barcode.y_mm, dpi),
            payload: &barcode.payload,
            fit: fit_code128(
                &barcode.payload,
                size(barcode.width_mm, dpi),
                size(barcode.height_mm, dpi),
            ),
        },
        Element::Barcode2D(barcode) => Placed::Qr {
            x: position(barcode.x_mm, dpi),
            y: position(barcode.y_mm, dpi),
            payload: &barcode.payload,
            fit: fit_qr(&barcode.payload, size(barcode.size_mm, dpi)),
        },
        Element::Table(table) => {
            let x = position(table.x_mm, dpi);
            let y = position(table.y_mm, dpi);
            // pitches are converted from the millimetre offset so rounding
            // does not accumulate along the grid
            let verticals = (1..table.cols)
                .map(|i| x + position(i as f64 * table.cell_width_mm, dpi))
                .collect();
            let horizontals = (1..table.rows)
                .map(|j| y + position(j as f64 * table.cell_height_mm, dpi))
                .collect();
            Placed::Table(TableGeometry {
                x,
                y,
                width: size(table.width_mm(), dpi),
                height: size(table.height_mm(), dpi),
                thickness: table.line_thickness_dots.max(1),
                verticals,
                horizontals,
            })
        }
    }
}
