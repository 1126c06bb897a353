use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RasterError {
    #[error("cannot load font: {0}")]
    FontLoad(&'static str),

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("text of {0} dots is too large to render")]
    TextTooLarge(u32),

    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    #[error("cannot decode graphic data: {0}")]
    Decode(String),

    #[error("cannot compress graphic data: {0}")]
    Compress(String),
}
