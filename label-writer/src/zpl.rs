use std::fmt::Write;

use label_renderer::{TextRasterizer, encode_graphic};

use crate::{
    CommandWriter, Placed, TextMode, WriteError, WriterOptions, escape_field_hex, needs_field_hex,
};

pub const START_FORMAT: &str = "^XA";
pub const END_FORMAT: &str = "^XZ";
/// Comment tag carrying the source text of a bitmap text field.
pub const TEXT_COMMENT_TAG: &str = "TEXT";
/// QR field data prefix: error correction M, automatic input mode.
pub const QR_MODE_MARKER: &str = "MA,";

/// Emits the ZPL subset understood by `zpl-parser`.
#[derive(Debug, Clone, Copy)]
pub struct ZplWriter<'a> {
    options: WriterOptions,
    rasterizer: Option<&'a TextRasterizer>,
}

impl<'a> ZplWriter<'a> {
    pub fn new(options: WriterOptions, rasterizer: Option<&'a TextRasterizer>) -> Self {
        Self {
            options,
            rasterizer,
        }
    }

    fn field_data<W: Write>(&self, prefix: &str, data: &str, out: &mut W) -> Result<(), WriteError> {
        if needs_field_hex(data) {
            write!(out, "^FH_^FD{prefix}{}", escape_field_hex(data))?;
        } else {
            write!(out, "^FD{prefix}{data}")?;
        }
        Ok(())
    }

    fn text<W: Write>(
        &self,
        content: &str,
        height_dots: u32,
        width_dots: u32,
        out: &mut W,
    ) -> Result<(), WriteError> {
        match self.options.text_mode {
            TextMode::ScalableFont => {
                write!(out, "^A0N,{height_dots},{width_dots}")?;
                self.field_data("", content, out)?;
            }
            TextMode::Bitmap => {
                let rasterizer = self.rasterizer.ok_or(WriteError::MissingRasterizer)?;
                let bitmap =
                    rasterizer.rasterize(content, height_dots, width_dots, self.options.oversample)?;
                let graphic = encode_graphic(&bitmap, self.options.graphic_encoding)?;
                write!(
                    out,
                    "^GFA,{},{},{},{}^FX{TEXT_COMMENT_TAG},{height_dots},{width_dots},{}",
                    graphic.data_bytes,
                    graphic.total_bytes,
                    graphic.bytes_per_row,
                    graphic.data,
                    escape_field_hex(content)
                )?;
            }
        }
        Ok(())
    }
}

impl CommandWriter for ZplWriter<'_> {
    fn begin<W: Write>(&self, out: &mut W) -> Result<(), WriteError> {
        writeln!(out, "{START_FORMAT}")?;
        Ok(())
    }

    fn element<W: Write>(&self, placed: &Placed<'_>, out: &mut W) -> Result<(), WriteError> {
        match placed {
            Placed::Text {
                x,
                y,
                content,
                height_dots,
                width_dots,
            } => {
                write!(out, "^FO{x},{y}")?;
                self.text(content, *height_dots, *width_dots, out)?;
                writeln!(out, "^FS")?;
            }
            Placed::Code128 { x, y, payload, fit } => {
                let h = fit.height_dots;
                write!(out, "^FO{x},{y}^BY{},2,{h}^BCN,{h},N,N,N", fit.module_width)?;
                self.field_data("", payload, out)?;
                writeln!(out, "^FS")?;
            }
            Placed::Qr { x, y, payload, fit } => {
                write!(out, "^FO{x},{y}^BQN,2,{}", fit.magnification)?;
                self.field_data(QR_MODE_MARKER, payload, out)?;
                writeln!(out, "^FS")?;
            }
            Placed::Table(table) => {
                let t = table.thickness;
                let (w, h) = (table.width, table.height);
                writeln!(out, "^FO{},{}^GB{w},{h},{t}^FS", table.x, table.y)?;
                for x in &table.verticals {
                    writeln!(out, "^FO{x},{}^GB{t},{h},{t}^FS", table.y)?;
                }
                for y in &table.horizontals {
                    writeln!(out, "^FO{},{y}^GB{w},{t},{t}^FS", table.x)?;
                }
            }
        }
        Ok(())
    }

    fn end<W: Write>(&self, out: &mut W) -> Result<(), WriteError> {
        write!(out, "{END_FORMAT}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use label_model::{Barcode1D, Barcode2D, Dpi, Element, Table, TextElement};
    use label_renderer::GraphicEncoding;

    use super::*;
    use crate::to_string;

    fn font_writer() -> ZplWriter<'static> {
        ZplWriter::new(
            WriterOptions {
                text_mode: TextMode::ScalableFont,
                ..WriterOptions::default()
            },
            None,
        )
    }

    #[test]
    fn empty_label_test() {
        let zpl = to_string(&font_writer(), Dpi::Dpi203, &[]).unwrap();
        assert_eq!(zpl, "^XA\n^XZ");
    }

    #[test]
    fn scalable_text_test() {
        let elements: Vec<Element> = vec![TextElement::new("HELLO", 5., 5.).into()];
        let zpl = to_string(&font_writer(), Dpi::Dpi203, &elements).unwrap();
        assert_eq!(zpl, "^XA\n^FO40,40^A0N,30,30^FDHELLO^FS\n^XZ");
    }

    #[test]
    fn escaped_payload_test() {
        let elements: Vec<Element> = vec![Barcode1D::code128("A^B", 0., 0., 40., 10.).into()];
        let zpl = to_string(&font_writer(), Dpi::Dpi203, &elements).unwrap();
        assert!(zpl.contains("^BCN,80,N,N,N^FH_^FDA_5EB^FS"), "{zpl}");
    }

    #[test]
    fn bitmap_text_test() {
        let rasterizer = TextRasterizer::bundled().unwrap();
        let writer = ZplWriter::new(WriterOptions::default(), Some(&rasterizer));
        let elements: Vec<Element> = vec![TextElement::new("HELLO", 5., 5.).into()];
        let zpl = to_string(&writer, Dpi::Dpi203, &elements).unwrap();
        assert!(zpl.starts_with("^XA\n^FO40,40^GFA,"), "{zpl}");
        assert!(zpl.ends_with("^FXTEXT,30,30,HELLO^FS\n^XZ"), "{zpl}");
    }

    #[test]
    fn bitmap_text_z64_test() {
        let rasterizer = TextRasterizer::bundled().unwrap();
        let writer = ZplWriter::new(
            WriterOptions {
                graphic_encoding: GraphicEncoding::Z64,
                ..WriterOptions::default()
            },
            Some(&rasterizer),
        );
        let elements: Vec<Element> = vec![TextElement::new("HELLO", 5., 5.).into()];
        let zpl = to_string(&writer, Dpi::Dpi203, &elements).unwrap();
        assert!(zpl.contains(",:Z64:"), "{zpl}");
    }

    #[test]
    fn bitmap_text_needs_rasterizer_test() {
        let writer = ZplWriter::new(WriterOptions::default(), None);
        let elements: Vec<Element> = vec![TextElement::new("HELLO", 5., 5.).into()];
        assert!(matches!(
            to_string(&writer, Dpi::Dpi203, &elements),
            Err(WriteError::MissingRasterizer)
        ));
    }

    #[test]
    fn qr_test() {
        let elements: Vec<Element> = vec![Barcode2D::qr("HELLO", 0., 0., 18.).into()];
        let zpl = to_string(&font_writer(), Dpi::Dpi203, &elements).unwrap();
        // 18 mm is 144 dots, a 21 module symbol fits 6 times
        assert_eq!(zpl, "^XA\n^FO0,0^BQN,2,6^FDMA,HELLO^FS\n^XZ");
    }

    #[test]
    fn table_test() {
        let elements: Vec<Element> = vec![Table::new(10., 10., 2, 2, 10., 5.).into()];
        let zpl = to_string(&font_writer(), Dpi::Dpi203, &elements).unwrap();
        assert_eq!(
            zpl,
            "^XA\n\
             ^FO80,80^GB160,80,3^FS\n\
             ^FO160,80^GB3,80,3^FS\n\
             ^FO80,120^GB160,3,3^FS\n\
             ^XZ"
        );
    }

    #[test]
    fn output_is_stable_test() {
        let rasterizer = TextRasterizer::bundled().unwrap();
        let writer = ZplWriter::new(WriterOptions::default(), Some(&rasterizer));
        let elements: Vec<Element> = vec![
            TextElement::new("Lot 7", 2., 2.).into(),
            Barcode1D::code128("0123456789", 2., 10., 30., 10.).into(),
            Barcode2D::qr("https://example.com", 2., 25., 18.).into(),
        ];
        let first = to_string(&writer, Dpi::Dpi300, &elements).unwrap();
        let second = to_string(&writer, Dpi::Dpi300, &elements).unwrap();
        assert_eq!(first, second);
    }
}
