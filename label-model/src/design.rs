use serde::{Deserialize, Serialize};

use crate::{Dpi, Element, LabelError, MAX_TEXT_DOTS, PaperSize};

/// A named label layout at a fixed resolution and paper size.
///
/// Elements are validated on the way in, so serializers can rely on
/// positive sizes and non-empty barcode payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DesignDocument")]
pub struct LabelDesign {
    name: String,
    dpi: Dpi,
    paper: PaperSize,
    elements: Vec<Element>,
}

#[derive(Deserialize)]
struct DesignDocument {
    name: String,
    #[serde(default)]
    dpi: Dpi,
    #[serde(default)]
    paper: PaperSize,
    #[serde(default)]
    elements: Vec<Element>,
}

impl TryFrom<DesignDocument> for LabelDesign {
    type Error = LabelError;

    fn try_from(doc: DesignDocument) -> Result<Self, Self::Error> {
        let mut design = LabelDesign::new(doc.name, doc.dpi, doc.paper);
        for element in doc.elements {
            design.push(element)?;
        }
        Ok(design)
    }
}

impl LabelDesign {
    pub fn new(name: impl Into<String>, dpi: Dpi, paper: PaperSize) -> Self {
        Self {
            name: name.into(),
            dpi,
            paper,
            elements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dpi(&self) -> Dpi {
        self.dpi
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn push(&mut self, element: impl Into<Element>) -> Result<(), LabelError> {
        let element = element.into();
        element.validate()?;
        self.elements.push(element);
        Ok(())
    }

    pub fn with(mut self, element: impl Into<Element>) -> Result<Self, LabelError> {
        self.push(element)?;
        Ok(self)
    }

    pub fn remove(&mut self, index: usize) -> Option<Element> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    /// Replaces the element at `index`, keeping its stacking position.
    /// Returns `Ok(false)` for an unknown index.
    pub fn replace(&mut self, index: usize, element: impl Into<Element>) -> Result<bool, LabelError> {
        let element = element.into();
        element.validate()?;
        match self.elements.get_mut(index) {
            Some(slot) => {
                *slot = element;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Moves an element and clamps it to the paper. Returns `false` for an
    /// unknown index.
    pub fn move_to(&mut self, index: usize, x_mm: f64, y_mm: f64, text_extent: (f64, f64)) -> bool {
        let paper = self.paper;
        match self.elements.get_mut(index) {
            Some(element) => {
                element.set_origin_mm(x_mm, y_mm);
                element.clamp_to(&paper, text_extent);
                true
            }
            None => false,
        }
    }

    pub fn bring_to_front(&mut self, index: usize) -> bool {
        match self.remove(index) {
            Some(element) => {
                self.elements.push(element);
                true
            }
            None => false,
        }
    }

    pub fn send_to_back(&mut self, index: usize) -> bool {
        match self.remove(index) {
            Some(element) => {
                self.elements.insert(0, element);
                true
            }
            None => false,
        }
    }

    /// Same layout at another resolution. Millimetre geometry carries over
    /// as is, nominal text sizes (kept in dots) scale with the resolution.
    pub fn rescaled(&self, dpi: Dpi) -> Self {
        let ratio = dpi.dots_per_inch() as f64 / self.dpi.dots_per_inch() as f64;
        let scale = |dots: u32| ((dots as f64 * ratio).round() as u32).max(1);
        let elements = self
            .elements
            .iter()
            .cloned()
            .map(|element| match element {
                Element::Text(mut text) => {
                    text.nominal_height_dots = scale(text.nominal_height_dots).min(MAX_TEXT_DOTS);
                    text.nominal_width_dots = scale(text.nominal_width_dots).min(MAX_TEXT_DOTS);
                    Element::Text(text)
                }
                Element::Table(mut table) => {
                    table.line_thickness_dots = scale(table.line_thickness_dots);
                    Element::Table(table)
                }
                other => other,
            })
            .collect();

        Self {
            name: self.name.clone(),
            dpi,
            paper: self.paper,
            elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Barcode1D, Barcode2D, Table, TextElement};

    fn sample() -> LabelDesign {
        LabelDesign::new("sample", Dpi::Dpi203, PaperSize::new(45., 70.))
            .with(TextElement::new("HELLO", 5., 5.))
            .unwrap()
            .with(Barcode1D::code128("0123456789", 5., 20., 30., 10.))
            .unwrap()
            .with(Barcode2D::qr("QR", 5., 40., 18.))
            .unwrap()
    }

    #[test]
    fn push_rejects_invalid_test() {
        let mut design = sample();
        let err = design.push(Table::new(0., 0., 1, 0, 5., 5.)).unwrap_err();
        assert_eq!(err, LabelError::InvalidTable { rows: 1, cols: 0 });
        assert_eq!(design.len(), 3);
    }

    #[test]
    fn reorder_test() {
        let mut design = sample();
        assert!(design.bring_to_front(0));
        assert_eq!(design.elements()[2].kind(), "text");
        assert!(design.send_to_back(2));
        assert_eq!(design.elements()[0].kind(), "text");
        assert!(!design.bring_to_front(7));
    }

    #[test]
    fn move_to_clamps_test() {
        let mut design = sample();
        assert!(design.move_to(1, -10., -10., (20., 10.)));
        assert_eq!(design.elements()[1].origin_mm(), (0., 0.));
        assert!(design.move_to(1, 40., 80., (20., 10.)));
        assert_eq!(design.elements()[1].origin_mm(), (15., 60.));
    }

    #[test]
    fn rescaled_test() {
        let design = sample().rescaled(Dpi::Dpi600);
        assert_eq!(design.dpi(), Dpi::Dpi600);
        match &design.elements()[0] {
            Element::Text(text) => {
                assert_eq!(text.nominal_height_dots, 89);
                assert_eq!((text.x_mm, text.y_mm), (5., 5.));
            }
            other => panic!("unexpected {other:?}"),
        }

        let large = LabelDesign::new("large", Dpi::Dpi203, PaperSize::default())
            .with(TextElement::new("H", 0., 0.).with_size(MAX_TEXT_DOTS, 30))
            .unwrap()
            .rescaled(Dpi::Dpi600);
        assert!(large.elements().iter().all(|e| e.validate().is_ok()));
    }

    #[test]
    fn design_json_test() {
        let json = r#"{
            "name": "shelf",
            "dpi": 300,
            "paper": { "width_mm": 45, "height_mm": 70 },
            "elements": [
                { "kind": "table", "x_mm": 1, "y_mm": 1, "rows": 2, "cols": 3, "cell_width_mm": 10, "cell_height_mm": 5 }
            ]
        }"#;
        let design: LabelDesign = serde_json::from_str(json).unwrap();
        assert_eq!(design.dpi(), Dpi::Dpi300);
        assert_eq!(design.elements(), &[Element::Table(Table::new(1., 1., 2, 3, 10., 5.))]);

        let bad = r#"{ "name": "x", "dpi": 72 }"#;
        assert!(serde_json::from_str::<LabelDesign>(bad).is_err());

        let invalid = r#"{ "name": "x", "elements": [{ "kind": "barcode1d", "payload": "", "x_mm": 0, "y_mm": 0, "width_mm": 1, "height_mm": 1 }] }"#;
        assert!(serde_json::from_str::<LabelDesign>(invalid).is_err());
    }
}
