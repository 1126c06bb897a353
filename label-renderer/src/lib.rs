mod bitmap;
mod error;
mod graphic;
mod text;

pub use bitmap::PackedBitmap;
pub use error::RasterError;
pub use graphic::{GraphicEncoding, GraphicPayload, decode_graphic, encode_graphic};
pub use text::{MAX_RENDER_PX, Oversample, TextExtent, TextRasterizer};
