use label_model::{Dpi, Element, LabelDesign, TextElement, dots_to_mm};
use label_renderer::TextRasterizer;
use label_writer::{PglWriter, WriterOptions, ZplWriter, to_string};
use zpl_interpreter::{ParseOptions, interpret};
use zpl_parser::{label_body, parse_zpl};

use crate::{CodecError, DesignRecord};

/// Serializes designs to ZPL and PGL and parses ZPL back into elements.
#[derive(Debug)]
pub struct LabelCodec {
    rasterizer: TextRasterizer,
    writer: WriterOptions,
    parser: ParseOptions,
}

impl LabelCodec {
    /// A codec rendering text with the bundled DejaVu Sans.
    pub fn new() -> Result<Self, CodecError> {
        Ok(Self::with_rasterizer(TextRasterizer::bundled()?))
    }

    /// A codec rendering text with the given TrueType or OpenType font.
    pub fn with_font(font_data: &[u8]) -> Result<Self, CodecError> {
        Ok(Self::with_rasterizer(TextRasterizer::from_bytes(font_data)?))
    }

    fn with_rasterizer(rasterizer: TextRasterizer) -> Self {
        Self {
            rasterizer,
            writer: WriterOptions::default(),
            parser: ParseOptions::default(),
        }
    }

    pub fn writer_options(mut self, options: WriterOptions) -> Self {
        self.writer = options;
        self
    }

    pub fn parse_options(mut self, options: ParseOptions) -> Self {
        self.parser = options;
        self
    }

    pub fn zpl(&self, design: &LabelDesign) -> Result<String, CodecError> {
        let writer = ZplWriter::new(self.writer, Some(&self.rasterizer));
        Ok(to_string(&writer, design.dpi(), design.elements())?)
    }

    pub fn pgl(&self, design: &LabelDesign) -> Result<String, CodecError> {
        Ok(to_string(&PglWriter, design.dpi(), design.elements())?)
    }

    /// Both command streams for `design`, ZPL first.
    pub fn serialize(&self, design: &LabelDesign) -> Result<(String, String), CodecError> {
        log::debug!(
            "serializing {:?}: {} elements at {} dpi",
            design.name(),
            design.len(),
            design.dpi()
        );
        Ok((self.zpl(design)?, self.pgl(design)?))
    }

    /// Elements recognized in `zpl`, read at `dpi`. Texts come first, then
    /// Code 128, QR and tables, each group in stream order. Anything not
    /// written by this codec is skipped.
    pub fn parse(&self, zpl: &str, dpi: Dpi) -> Vec<Element> {
        interpret(&parse_zpl(zpl), dpi, &self.parser)
    }

    /// Like [`LabelCodec::parse`] but requires the `^XA ... ^XZ` envelope.
    pub fn parse_strict(&self, zpl: &str, dpi: Dpi) -> Result<Vec<Element>, CodecError> {
        label_body(zpl)?;
        Ok(self.parse(zpl, dpi))
    }

    pub fn record(&self, design: &LabelDesign) -> Result<DesignRecord, CodecError> {
        let (zpl, pgl) = self.serialize(design)?;
        Ok(DesignRecord {
            name: design.name().to_string(),
            dpi: design.dpi(),
            paper_width_mm: design.paper().width_mm,
            paper_height_mm: design.paper().height_mm,
            zpl,
            pgl,
        })
    }

    /// Rebuilds an editable design from a stored record, keeping every
    /// element on the record's paper.
    pub fn load(&self, record: &DesignRecord) -> Result<LabelDesign, CodecError> {
        let paper = record.paper();
        let options = ParseOptions {
            bounds: Some(self.parser.bounds.unwrap_or(paper)),
            ..self.parser
        };
        let mut design = LabelDesign::new(record.name.clone(), record.dpi, paper);
        for element in interpret(&parse_zpl(&record.zpl), record.dpi, &options) {
            design.push(element)?;
        }
        Ok(design)
    }

    /// Rendered size of a text element in millimetres.
    pub fn text_extent_mm(&self, text: &TextElement, dpi: Dpi) -> (f64, f64) {
        let extent = self.rasterizer.measure(
            &text.content,
            text.nominal_height_dots,
            text.nominal_width_dots,
        );
        (
            dots_to_mm(extent.width_dots as i32, dpi),
            dots_to_mm(extent.height_dots as i32, dpi),
        )
    }

    /// Moves an element and clamps it onto the paper, measuring text with
    /// this codec's font.
    pub fn move_element(
        &self,
        design: &mut LabelDesign,
        index: usize,
        x_mm: f64,
        y_mm: f64,
    ) -> bool {
        let text_extent = match design.elements().get(index) {
            Some(Element::Text(text)) => self.text_extent_mm(text, design.dpi()),
            Some(_) => (0., 0.),
            None => return false,
        };
        design.move_to(index, x_mm, y_mm, text_extent)
    }
}

#[cfg(test)]
mod tests {
    use label_model::{Barcode1D, PaperSize};

    use super::*;

    fn design() -> LabelDesign {
        LabelDesign::new("shelf", Dpi::Dpi203, PaperSize::new(45., 70.))
            .with(TextElement::new("HELLO", 5., 5.))
            .unwrap()
            .with(Barcode1D::code128("0123456789", 5., 20., 30., 10.))
            .unwrap()
    }

    #[test]
    fn serialize_test() {
        let codec = LabelCodec::new().unwrap();
        let (zpl, pgl) = codec.serialize(&design()).unwrap();
        assert!(zpl.starts_with("^XA\n^FO40,40^GFA,"));
        assert!(zpl.ends_with("^XZ"));
        assert!(pgl.starts_with("<PGL_START>\nTEXT 40,40,30,30,\"HELLO\";\n"));
        assert!(pgl.ends_with("<PGL_END>"));
    }

    #[test]
    fn parse_strict_test() {
        let codec = LabelCodec::new().unwrap();
        assert!(codec.parse_strict("^FO0,0^A0N,30,30^FDX^FS", Dpi::Dpi203).is_err());
        let elements = codec
            .parse_strict("^XA\n^FO0,0^A0N,30,30^FDX^FS\n^XZ", Dpi::Dpi203)
            .unwrap();
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn move_element_test() {
        let codec = LabelCodec::new().unwrap();
        let mut design = design();
        assert!(codec.move_element(&mut design, 1, 100., -3.));
        assert_eq!(design.elements()[1].origin_mm(), (15., 0.));

        assert!(codec.move_element(&mut design, 0, 100., 100.));
        let (x, y) = design.elements()[0].origin_mm();
        let (width, height) = match &design.elements()[0] {
            Element::Text(text) => codec.text_extent_mm(text, Dpi::Dpi203),
            other => panic!("unexpected {other:?}"),
        };
        assert!((x + width - 45.).abs() < 1e-9);
        assert!((y + height - 70.).abs() < 1e-9);

        assert!(!codec.move_element(&mut design, 9, 0., 0.));
    }
}
