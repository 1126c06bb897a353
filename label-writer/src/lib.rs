//! Serializers that turn a list of label elements into printer command
//! text. Both dialects consume the same dot layout, so they always describe
//! the same physical label.

mod escape;
mod layout;
mod pgl;
mod zpl;

use std::fmt;

use label_model::{Dpi, Element};
use label_renderer::{GraphicEncoding, Oversample, RasterError};
use thiserror::Error;

pub use escape::{escape_field_hex, escape_pgl_string, needs_field_hex};
pub use layout::{Placed, TableGeometry, place};
pub use pgl::PglWriter;
pub use zpl::ZplWriter;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error("cannot write command text")]
    Format(#[from] fmt::Error),

    #[error("bitmap text needs a rasterizer")]
    MissingRasterizer,
}

/// How text elements are expressed in ZPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Rendered to a bitmap and embedded as a graphic field
    #[default]
    Bitmap,
    /// Printer resident scalable font `^A0`
    ScalableFont,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterOptions {
    pub text_mode: TextMode,
    pub graphic_encoding: GraphicEncoding,
    pub oversample: Oversample,
}

/// One printer command dialect.
pub trait CommandWriter {
    fn begin<W: fmt::Write>(&self, out: &mut W) -> Result<(), WriteError>;
    fn element<W: fmt::Write>(&self, placed: &Placed<'_>, out: &mut W) -> Result<(), WriteError>;
    fn end<W: fmt::Write>(&self, out: &mut W) -> Result<(), WriteError>;
}

/// Streams a whole label, in element order, into `out`.
pub fn write_label<C: CommandWriter, W: fmt::Write>(
    writer: &C,
    dpi: Dpi,
    elements: &[Element],
    out: &mut W,
) -> Result<(), WriteError> {
    writer.begin(out)?;
    for element in elements {
        let placed = place(element, dpi);
        log::debug!("{} at {:?} dots", element.kind(), placed.origin());
        writer.element(&placed, out)?;
    }
    writer.end(out)
}

pub fn to_string<C: CommandWriter>(
    writer: &C,
    dpi: Dpi,
    elements: &[Element],
) -> Result<String, WriteError> {
    let mut out = String::new();
    write_label(writer, dpi, elements, &mut out)?;
    Ok(out)
}
