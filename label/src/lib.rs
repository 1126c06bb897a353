//! Label design codec.
//!
//! A [`LabelDesign`] holds positioned elements in millimetres. The codec
//! writes it as ZPL and PGL command text at the design's resolution and
//! reads ZPL it wrote back into elements:
//!
//! ```no_run
//! use label::{Dpi, LabelCodec, LabelDesign, PaperSize, TextElement};
//!
//! let codec = LabelCodec::new()?;
//! let design = LabelDesign::new("shelf", Dpi::Dpi203, PaperSize::new(45., 70.))
//!     .with(TextElement::new("HELLO", 5., 5.))?;
//! let (zpl, _pgl) = codec.serialize(&design)?;
//! let elements = codec.parse(&zpl, design.dpi());
//! # Ok::<(), label::CodecError>(())
//! ```

mod codec;
mod error;
mod record;

pub use codec::LabelCodec;
pub use error::CodecError;
pub use record::{DesignRecord, design_from_json};

pub use label_model::*;
pub use label_renderer::{GraphicEncoding, Oversample};
pub use label_writer::{TextMode, WriterOptions};
pub use zpl_interpreter::{FootprintSource, ParseOptions, ReferenceFootprints};
