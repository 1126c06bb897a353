use label::{
    Barcode1D, Barcode2D, Dpi, Element, FootprintSource, GraphicEncoding, LabelCodec, LabelDesign,
    Oversample, PaperSize, ParseOptions, Table, TextElement, TextMode, WriterOptions, dots_to_mm,
    mm_to_dots,
};
use pretty_assertions::assert_eq;

fn sample(dpi: Dpi) -> LabelDesign {
    LabelDesign::new("shelf", dpi, PaperSize::new(45., 70.))
        .with(TextElement::new("HELLO", 5., 5.))
        .and_then(|d| d.with(Barcode1D::code128("0123456789", 3.2, 14.7, 30., 10.)))
        .and_then(|d| d.with(Barcode2D::qr("https://example.com/p/42", 7.5, 30.1, 18.)))
        .unwrap()
}

fn payloads(elements: &[Element]) -> Vec<String> {
    elements
        .iter()
        .map(|element| match element {
            Element::Text(text) => text.content.clone(),
            Element::Barcode1D(barcode) => barcode.payload.clone(),
            Element::Barcode2D(barcode) => barcode.payload.clone(),
            Element::Table(table) => format!("{}x{}", table.rows, table.cols),
        })
        .collect()
}

fn assert_within_one_dot(original: &[Element], parsed: &[Element], dpi: Dpi) {
    assert_eq!(original.len(), parsed.len());
    for (a, b) in original.iter().zip(parsed) {
        let (ax, ay) = a.origin_mm();
        let (bx, by) = b.origin_mm();
        assert!((ax - bx).abs() <= dpi.dot_mm(), "{a:?} vs {b:?}");
        assert!((ay - by).abs() <= dpi.dot_mm(), "{a:?} vs {b:?}");
    }
}

#[test]
fn roundtrip_text_and_barcodes_test() {
    let codec = LabelCodec::new().unwrap();
    for dpi in Dpi::ALL {
        let design = sample(dpi);
        let (zpl, _) = codec.serialize(&design).unwrap();
        let parsed = codec.parse(&zpl, dpi);

        assert_eq!(payloads(&parsed), payloads(design.elements()));
        assert_within_one_dot(design.elements(), &parsed, dpi);
    }
}

#[test]
fn hello_scenario_test() {
    let codec = LabelCodec::new().unwrap();
    let design = LabelDesign::new("hello", Dpi::Dpi203, PaperSize::default())
        .with(TextElement::new("HELLO", 5., 5.))
        .unwrap();
    let zpl = codec.zpl(&design).unwrap();
    assert!(zpl.starts_with("^XA\n^FO40,40^GFA,"), "{zpl}");

    let parsed = codec.parse(&zpl, Dpi::Dpi203);
    match parsed.as_slice() {
        [Element::Text(text)] => {
            assert_eq!(text.content, "HELLO");
            assert!((text.x_mm - 5.).abs() <= 0.13);
            assert!((text.y_mm - 5.).abs() <= 0.13);
            assert_eq!((text.nominal_height_dots, text.nominal_width_dots), (30, 30));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn serialization_is_idempotent_test() {
    let codec = LabelCodec::new().unwrap();
    let design = sample(Dpi::Dpi300);
    assert_eq!(codec.serialize(&design).unwrap(), codec.serialize(&design).unwrap());
}

#[test]
fn roundtrip_writer_options_test() {
    let modes = [
        WriterOptions::default(),
        WriterOptions {
            graphic_encoding: GraphicEncoding::Z64,
            oversample: Oversample::Double,
            ..WriterOptions::default()
        },
        WriterOptions {
            text_mode: TextMode::ScalableFont,
            ..WriterOptions::default()
        },
    ];
    for options in modes {
        let codec = LabelCodec::new().unwrap().writer_options(options);
        let design = sample(Dpi::Dpi203);
        let parsed = codec.parse(&codec.zpl(&design).unwrap(), Dpi::Dpi203);
        assert_eq!(payloads(&parsed), payloads(design.elements()), "{options:?}");
    }
}

#[test]
fn roundtrip_reserved_characters_test() {
    let codec = LabelCodec::new().unwrap();
    let design = LabelDesign::new("escapes", Dpi::Dpi203, PaperSize::default())
        .with(TextElement::new("50% ^off~ _now_", 2., 2.))
        .and_then(|d| d.with(Barcode1D::code128("A^FSB~C_D", 2., 10., 60., 10.)))
        .and_then(|d| d.with(Barcode2D::qr("^XZ", 2., 30., 20.)))
        .unwrap();
    let (zpl, pgl) = codec.serialize(&design).unwrap();
    assert_eq!(zpl.matches("^XZ").count(), 1);
    assert_eq!(zpl.matches("^FS").count(), 3);
    assert!(pgl.contains("\"A^FSB~C_D\""));

    let parsed = codec.parse(&zpl, Dpi::Dpi203);
    assert_eq!(payloads(&parsed), payloads(design.elements()));
}

#[test]
fn roundtrip_table_test() {
    let codec = LabelCodec::new().unwrap();
    let design = LabelDesign::new("grid", Dpi::Dpi203, PaperSize::default())
        .with(Table::new(2., 40., 3, 2, 15., 6.))
        .unwrap();
    let (zpl, pgl) = codec.serialize(&design).unwrap();
    assert_eq!(zpl.matches("^GB").count(), 1 + 1 + 2);
    assert_eq!(pgl.matches("LINE ").count(), 1 + 2);

    match codec.parse(&zpl, Dpi::Dpi203).as_slice() {
        [Element::Table(table)] => {
            assert_eq!((table.rows, table.cols), (3, 2));
            assert_eq!(table.line_thickness_dots, 3);
            assert!((table.cell_width_mm - 15.).abs() <= Dpi::Dpi203.dot_mm());
            assert!((table.cell_height_mm - 6.).abs() <= Dpi::Dpi203.dot_mm());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn roundtrip_stream_footprint_test() {
    let codec = LabelCodec::new().unwrap().parse_options(ParseOptions {
        footprint: FootprintSource::Stream,
        ..Default::default()
    });
    let design = LabelDesign::new("fit", Dpi::Dpi203, PaperSize::default())
        .with(Barcode1D::code128("0123456789", 0., 0., 40., 12.))
        .and_then(|d| d.with(Barcode2D::qr("HELLO", 0., 20., 18.)))
        .unwrap();
    let parsed = codec.parse(&codec.zpl(&design).unwrap(), Dpi::Dpi203);

    match parsed.as_slice() {
        [Element::Barcode1D(linear), Element::Barcode2D(matrix)] => {
            let width = mm_to_dots(linear.width_mm, Dpi::Dpi203);
            assert!(width <= mm_to_dots(40., Dpi::Dpi203));
            assert_eq!(linear.height_mm, dots_to_mm(mm_to_dots(12., Dpi::Dpi203), Dpi::Dpi203));
            // 18 mm is 144 dots: a 21 module symbol at magnification 6
            assert_eq!(matrix.magnification, 6);
            assert_eq!(matrix.size_mm, dots_to_mm(126, Dpi::Dpi203));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn record_and_load_test() {
    let codec = LabelCodec::new().unwrap();
    let design = sample(Dpi::Dpi300);
    let record = codec.record(&design).unwrap();
    assert_eq!(record.name, "shelf");
    assert_eq!(record.dpi, Dpi::Dpi300);
    assert_eq!((record.paper_width_mm, record.paper_height_mm), (45., 70.));
    assert!(record.pgl.starts_with("<PGL_START>"));

    let stored = record.to_json().unwrap();
    let loaded = codec
        .load(&label::DesignRecord::from_json(&stored).unwrap())
        .unwrap();
    assert_eq!(loaded.name(), "shelf");
    assert_eq!(loaded.paper(), PaperSize::new(45., 70.));
    assert_eq!(payloads(loaded.elements()), payloads(design.elements()));
    for element in loaded.elements() {
        let rect = element.footprint_mm((20., 10.));
        assert!(rect.x >= 0. && rect.x + rect.width <= 45. + 1e-9, "{element:?}");
        assert!(rect.y >= 0. && rect.y + rect.height <= 70. + 1e-9, "{element:?}");
    }
}

#[test]
fn parse_foreign_zpl_test() {
    let codec = LabelCodec::new().unwrap();
    let zpl = "^XA^PW685^LL236^FO86,78^A0N,51,51^FH\\^CI28^FD#1001#^FS^FO10,10^GB5,5,5,B,2^FS^XZ";
    let parsed = codec.parse(zpl, Dpi::Dpi203);
    assert!(parsed.is_empty());
}
