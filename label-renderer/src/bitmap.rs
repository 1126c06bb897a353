use crate::RasterError;

/// A 1-bit image, rows packed most significant bit first and padded to a
/// whole byte. A set bit is ink.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBitmap {
    pub width: usize,
    pub height: usize,
    pub bytes_per_row: usize,
    pub data: Vec<u8>,
}

impl PackedBitmap {
    pub fn from_fn(width: usize, height: usize, ink: impl Fn(usize, usize) -> bool) -> Self {
        let bytes_per_row = width.div_ceil(8);
        let mut data = vec![0u8; bytes_per_row * height];

        for y in 0..height {
            let row = &mut data[y * bytes_per_row..(y + 1) * bytes_per_row];
            for x in 0..width {
                if ink(x, y) {
                    row[x / 8] |= 0x80 >> (x % 8);
                }
            }
        }

        Self {
            width,
            height,
            bytes_per_row,
            data,
        }
    }

    /// Rebuilds a bitmap from its packed rows. The padding bits cannot be
    /// told apart from pixels, so the width is the padded one.
    pub fn from_packed(data: Vec<u8>, bytes_per_row: usize) -> Result<Self, RasterError> {
        if bytes_per_row == 0 || data.len() % bytes_per_row != 0 {
            return Err(RasterError::InvalidBitmap(format!(
                "{} bytes do not split into rows of {bytes_per_row}",
                data.len()
            )));
        }
        Ok(Self {
            width: bytes_per_row * 8,
            height: data.len() / bytes_per_row,
            bytes_per_row,
            data,
        })
    }

    pub fn total_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y * self.bytes_per_row + x / 8] & (0x80 >> (x % 8)) != 0
    }

    pub fn ink_count(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Uppercase ASCII hex, two characters per byte.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.data.len() * 2);
        for byte in &self.data {
            out.push_str(&format!("{byte:02X}"));
        }
        out
    }
}

pub(crate) fn decode_ascii_hex(s: &str) -> Result<Vec<u8>, RasterError> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err(RasterError::Decode("invalid ASCII hex length".into()));
    }

    cleaned
        .as_bytes()
        .chunks(2)
        .map(|chunk| {
            let hex = std::str::from_utf8(chunk)
                .map_err(|_| RasterError::Decode("non ASCII hex data".into()))?;
            u8::from_str_radix(hex, 16)
                .map_err(|_| RasterError::Decode(format!("invalid hex byte: {hex}")))
        })
        .collect()
}
