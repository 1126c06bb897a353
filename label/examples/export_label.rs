use label::{Barcode1D, Barcode2D, Dpi, LabelCodec, LabelDesign, PaperSize, Table, TextElement};

fn main() -> Result<(), label::CodecError> {
    env_logger::init();

    let design = LabelDesign::new("shelf", Dpi::Dpi203, PaperSize::new(60., 40.))
        .with(TextElement::new("Aisle 7 / Bin 42", 3., 3.))?
        .with(Barcode1D::code128("0007-0042", 3., 10., 40., 10.))?
        .with(Barcode2D::qr("https://example.com/bin/42", 45., 3., 12.))?
        .with(Table::new(3., 24., 2, 3, 12., 5.))?;

    let codec = LabelCodec::new()?;
    let (zpl, pgl) = codec.serialize(&design)?;
    std::fs::write("shelf.zpl", &zpl)?;
    std::fs::write("shelf.pgl", &pgl)?;
    println!("Wrote shelf.zpl ({} bytes) and shelf.pgl", zpl.len());
    Ok(())
}
