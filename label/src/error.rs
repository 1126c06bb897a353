use label_model::LabelError;
use label_renderer::RasterError;
use label_writer::WriteError;
use thiserror::Error;
use zpl_parser::ParseError;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Model(#[from] LabelError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid design document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
