use rxing::{
    BarcodeFormat, EncodeHintValue, EncodeHints, Writer, common::BitMatrix, qrcode::QRCodeWriter,
};

/// Error correction level the serializers announce in the field data.
pub(crate) const ERROR_CORRECTION: &str = "M";

pub(crate) fn encode_bare(contents: &str) -> Result<BitMatrix, rxing::Exceptions> {
    let writer = QRCodeWriter;
    writer.encode_with_hints(
        contents,
        &BarcodeFormat::QR_CODE,
        0,
        0,
        &EncodeHints::default()
            .with(EncodeHintValue::Margin("0".into()))
            .with(EncodeHintValue::ErrorCorrection(ERROR_CORRECTION.into())),
    )
}
