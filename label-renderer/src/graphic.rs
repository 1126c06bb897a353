//! Payloads of the ZPL `^GFA` graphic field.

use std::io::{Read, Write};

use base64::{Engine, engine::general_purpose};
use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};

use crate::{PackedBitmap, RasterError, bitmap::decode_ascii_hex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphicEncoding {
    /// Uppercase hex, two characters per byte
    #[default]
    Hex,
    /// zlib, then base64, framed as `:Z64:<data>:<crc>`
    Z64,
}

/// Everything after `^GFA,`: `data_bytes,total_bytes,bytes_per_row,data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicPayload {
    pub data_bytes: usize,
    pub total_bytes: usize,
    pub bytes_per_row: usize,
    pub data: String,
}

pub fn encode_graphic(
    bitmap: &PackedBitmap,
    encoding: GraphicEncoding,
) -> Result<GraphicPayload, RasterError> {
    let total_bytes = bitmap.total_bytes();
    let (data_bytes, data) = match encoding {
        GraphicEncoding::Hex => (total_bytes, bitmap.to_hex()),
        GraphicEncoding::Z64 => {
            let encoded = general_purpose::STANDARD.encode(compress_zlib(&bitmap.data)?);
            let crc = crc16_xmodem(encoded.as_bytes());
            // the byte count covers the base64 text plus ":" and four crc digits
            (encoded.len() + 5, format!(":Z64:{encoded}:{crc:04X}"))
        }
    };

    Ok(GraphicPayload {
        data_bytes,
        total_bytes,
        bytes_per_row: bitmap.bytes_per_row,
        data,
    })
}

/// Decodes hex or Z64 graphic data and checks it against the declared
/// sizes.
pub fn decode_graphic(
    data: &str,
    total_bytes: usize,
    bytes_per_row: usize,
) -> Result<PackedBitmap, RasterError> {
    let bytes = match data.strip_prefix(":Z64:") {
        Some(framed) => {
            let (encoded, crc) = framed.rsplit_once(':').unwrap_or((framed, ""));
            if !crc.is_empty() {
                let expected = crc16_xmodem(encoded.as_bytes());
                if u16::from_str_radix(crc, 16).ok() != Some(expected) {
                    return Err(RasterError::Decode(format!(
                        "crc mismatch: got {crc}, expected {expected:04X}"
                    )));
                }
            }
            decompress_zlib(&decode_base64(encoded)?)?
        }
        None => decode_ascii_hex(data)?,
    };

    if bytes.len() != total_bytes {
        return Err(RasterError::InvalidBitmap(format!(
            "declared {total_bytes} bytes, found {}",
            bytes.len()
        )));
    }
    PackedBitmap::from_packed(bytes, bytes_per_row)
}

fn decode_base64(s: &str) -> Result<Vec<u8>, RasterError> {
    let cleaned = s.trim().replace(char::is_whitespace, "");
    general_purpose::STANDARD
        .decode(&cleaned)
        .map_err(|e| RasterError::Decode(format!("invalid base64: {e}")))
}

fn decompress_zlib(data: &[u8]) -> Result<Vec<u8>, RasterError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| RasterError::Decode(format!("zlib decompress error: {e}")))?;
    Ok(out)
}

fn compress_zlib(data: &[u8]) -> Result<Vec<u8>, RasterError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| RasterError::Compress(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| RasterError::Compress(e.to_string()))
}

/// CRC-16/XMODEM (poly 0x1021, init 0), computed over the base64 text.
fn crc16_xmodem(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |crc, &byte| {
        (0..8).fold(crc ^ ((byte as u16) << 8), |crc, _| match crc & 0x8000 {
            0 => crc << 1,
            _ => (crc << 1) ^ 0x1021,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELARY_Z64: &str = "eJytk7ENg0AMRQ8BAinFNenZBMpshdkgK1CnyAp4g2SEG4ESIYLjozr7LkqKmO7JenxsUxhVhWk1sthrVOE+fO+yGLtcwtWbOgT14TqHqDxcwmZH68BAiBr0uShMZhd2lSS6ZnbZXaCVczWbSEUVttMSohNdEeAZoowe2NEovocIQbyQ/YREN1GT76KXeIhduhxECH9DKdce51KL7LwLBQLvcuobHcAsJ3HBthPzynlefSWnuvHsc5HCrryhTG0ovUe97eRNRJfz4b5UJW8VNPrv3f/yp6VccVdm7jqXGd7xtuh/";

    #[test]
    fn crc16_xmodem_test() {
        assert_eq!(crc16_xmodem(b"123456789"), 0x31C3);
        assert_eq!(crc16_xmodem(LABELARY_Z64.as_bytes()), 0xE957);
    }

    #[test]
    fn decode_z64_test() {
        let data = format!(":Z64:{LABELARY_Z64}:E957");
        let bmp = decode_graphic(&data, 988, 19).unwrap();
        assert_eq!(bmp.bytes_per_row, 19);
        assert_eq!(bmp.height, 52);
    }

    #[test]
    fn decode_z64_bad_crc_test() {
        let data = format!(":Z64:{LABELARY_Z64}:0000");
        assert!(matches!(
            decode_graphic(&data, 988, 19),
            Err(RasterError::Decode(_))
        ));
    }

    #[test]
    fn encode_hex_test() {
        let bmp = PackedBitmap::from_fn(12, 3, |x, _| x < 4);
        let payload = encode_graphic(&bmp, GraphicEncoding::Hex).unwrap();
        assert_eq!(
            payload,
            GraphicPayload {
                data_bytes: 6,
                total_bytes: 6,
                bytes_per_row: 2,
                data: "F000F000F000".into(),
            }
        );
    }

    #[test]
    fn z64_decodes_to_same_bytes_test() {
        let bmp = PackedBitmap::from_fn(75, 40, |x, y| (x * y) % 7 == 1);
        let payload = encode_graphic(&bmp, GraphicEncoding::Z64).unwrap();
        assert!(payload.data.starts_with(":Z64:"));
        assert_eq!(payload.data_bytes, payload.data.len() - ":Z64:".len());
        let back = decode_graphic(&payload.data, payload.total_bytes, payload.bytes_per_row).unwrap();
        assert_eq!(back.data, bmp.data);
    }

    #[test]
    fn declared_size_mismatch_test() {
        assert!(matches!(
            decode_graphic("FF00", 3, 1),
            Err(RasterError::InvalidBitmap(_))
        ));
    }
}
