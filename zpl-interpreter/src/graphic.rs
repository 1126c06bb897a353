use label_renderer::{PackedBitmap, RasterError, decode_graphic};
use zpl_parser::GraphicField;

const Z64_PREFIX: &str = ":Z64:";

/// Decodes a `^GFA` field. The declared data byte count has to agree with
/// the payload: two characters per byte for hex, the framed text minus
/// the `:Z64:` prefix for Z64.
pub(crate) fn decode_field(field: &GraphicField) -> Result<PackedBitmap, RasterError> {
    let (found, even) = match field.data.starts_with(Z64_PREFIX) {
        true => (field.data.len() - Z64_PREFIX.len(), true),
        false => (field.data.len() / 2, field.data.len() % 2 == 0),
    };
    let consistent = even && found == field.data_bytes;
    if !consistent {
        return Err(RasterError::InvalidBitmap(format!(
            "declared {} data bytes, payload has {found}",
            field.data_bytes
        )));
    }
    decode_graphic(&field.data, field.total_bytes, field.bytes_per_row)
}
