use rxing::{
    BarcodeFormat, EncodeHintValue, EncodeHints, Writer, common::BitMatrix, oned::Code128Writer,
};

/// Blank modules a printer expects on each side of the bars, counted once
/// for the whole symbol when fitting.
pub const CODE128_QUIET_ZONE: u32 = 10;

// Code128 structure:
// - Start code: 11 modules
// - Each symbol character: 11 modules
// - Checksum: 11 modules
// - Stop pattern: 13 modules
// The encoder picks the code set, so the count is taken from its output.
pub(crate) fn encode_bare(contents: &str) -> Result<BitMatrix, rxing::Exceptions> {
    let writer = Code128Writer::default();
    writer.encode_with_hints(
        contents,
        &BarcodeFormat::CODE_128,
        0,
        0,
        &EncodeHints::default().with(EncodeHintValue::Margin("0".into())),
    )
}
