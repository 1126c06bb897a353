//! The boundary with an interactive editor, which works in absolute screen
//! pixels at some display density.

use crate::{Barcode1D, Barcode2D, Element, Rect, Table, TextElement, mm_to_px, px_to_mm};

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenContent {
    Text {
        content: String,
        height_dots: u32,
        width_dots: u32,
    },
    Barcode1D {
        payload: String,
    },
    Barcode2D {
        payload: String,
    },
    Table {
        rows: u32,
        cols: u32,
    },
}

/// An editor view: what it shows and where, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenElement {
    pub content: ScreenContent,
    pub bounds: Rect,
}

fn rect_to_mm(rect: Rect, density: f64) -> Rect {
    Rect::new(
        px_to_mm(rect.x, density),
        px_to_mm(rect.y, density),
        px_to_mm(rect.width, density),
        px_to_mm(rect.height, density),
    )
}

fn rect_to_px(rect: Rect, density: f64) -> Rect {
    Rect::new(
        mm_to_px(rect.x, density),
        mm_to_px(rect.y, density),
        mm_to_px(rect.width, density),
        mm_to_px(rect.height, density),
    )
}

impl ScreenElement {
    /// Converts to the millimetre model. A 2D code takes the smaller side
    /// of its view as its size, a table divides its view into equal cells.
    pub fn to_element(&self, density: f64) -> Element {
        let mm = rect_to_mm(self.bounds, density);
        match &self.content {
            ScreenContent::Text {
                content,
                height_dots,
                width_dots,
            } => TextElement::new(content.clone(), mm.x, mm.y)
                .with_size(*height_dots, *width_dots)
                .into(),
            ScreenContent::Barcode1D { payload } => {
                Barcode1D::code128(payload.clone(), mm.x, mm.y, mm.width, mm.height).into()
            }
            ScreenContent::Barcode2D { payload } => {
                Barcode2D::qr(payload.clone(), mm.x, mm.y, mm.width.min(mm.height)).into()
            }
            ScreenContent::Table { rows, cols } => {
                let rows = (*rows).max(1);
                let cols = (*cols).max(1);
                Table::new(
                    mm.x,
                    mm.y,
                    rows,
                    cols,
                    mm.width / cols as f64,
                    mm.height / rows as f64,
                )
                .into()
            }
        }
    }

    /// Inverse of [`ScreenElement::to_element`]. Text gets `text_extent`
    /// (millimetres) as its view size.
    pub fn from_element(element: &Element, density: f64, text_extent: (f64, f64)) -> Self {
        let bounds = rect_to_px(element.footprint_mm(text_extent), density);
        let content = match element {
            Element::Text(t) => ScreenContent::Text {
                content: t.content.clone(),
                height_dots: t.nominal_height_dots,
                width_dots: t.nominal_width_dots,
            },
            Element::Barcode1D(b) => ScreenContent::Barcode1D {
                payload: b.payload.clone(),
            },
            Element::Barcode2D(b) => ScreenContent::Barcode2D {
                payload: b.payload.clone(),
            },
            Element::Table(t) => ScreenContent::Table {
                rows: t.rows,
                cols: t.cols,
            },
        };
        Self { content, bounds }
    }

    /// Keeps the view inside an editor area of the given pixel size.
    pub fn clamp_to_area(&mut self, area_width: f64, area_height: f64) {
        self.bounds = self.bounds.clamp_within(area_width, area_height);
    }
}

/// Snapshot of an editor's views, in stacking order.
pub fn elements_from_screen(views: &[ScreenElement], density: f64) -> Vec<Element> {
    views.iter().map(|view| view.to_element(density)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_LINE_THICKNESS_DOTS;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn screen_to_element_test() {
        let density = 2.;
        let px = |mm: f64| mm_to_px(mm, density);
        let view = ScreenElement {
            content: ScreenContent::Barcode1D {
                payload: "0123456789".into(),
            },
            bounds: Rect::new(px(5.), px(20.), px(30.), px(10.)),
        };
        match view.to_element(density) {
            Element::Barcode1D(b) => {
                assert!(close(b.x_mm, 5.) && close(b.y_mm, 20.));
                assert!(close(b.width_mm, 30.) && close(b.height_mm, 10.));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn screen_table_test() {
        let density = 1.;
        let px = |mm: f64| mm_to_px(mm, density);
        let view = ScreenElement {
            content: ScreenContent::Table { rows: 2, cols: 4 },
            bounds: Rect::new(0., 0., px(40.), px(10.)),
        };
        match view.to_element(density) {
            Element::Table(t) => {
                assert!(close(t.cell_width_mm, 10.) && close(t.cell_height_mm, 5.));
                assert_eq!(t.line_thickness_dots, DEFAULT_LINE_THICKNESS_DOTS);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn element_to_screen_round_trip_test() {
        let density = 2.625;
        let element: Element = Barcode2D::qr("QR", 3., 4., 18.).into();
        let view = ScreenElement::from_element(&element, density, (20., 10.));
        assert!(close(view.bounds.width, view.bounds.height));
        assert_eq!(view.to_element(density).kind(), "barcode2d");
        let back = view.to_element(density);
        let (x, y) = back.origin_mm();
        assert!(close(x, 3.) && close(y, 4.));
    }

    #[test]
    fn clamp_to_area_test() {
        let mut view = ScreenElement {
            content: ScreenContent::Barcode2D {
                payload: "QR".into(),
            },
            bounds: Rect::new(-15., 500., 100., 100.),
        };
        view.clamp_to_area(300., 400.);
        assert_eq!(view.bounds, Rect::new(0., 300., 100., 100.));
    }
}
