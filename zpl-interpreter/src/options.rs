use label_model::PaperSize;

/// Sizes given to reconstructed elements when the stream does not say, in
/// millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFootprints {
    /// width, height
    pub text: (f64, f64),
    /// width, height
    pub linear: (f64, f64),
    pub matrix: f64,
}

impl Default for ReferenceFootprints {
    fn default() -> Self {
        Self {
            text: (20., 10.),
            linear: (30., 10.),
            matrix: 18.,
        }
    }
}

/// Where barcode and text footprints come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FootprintSource {
    /// Always the reference footprints
    #[default]
    Reference,
    /// The printed size recorded in the stream: bar height and realized
    /// symbol width for barcodes, bitmap size for bitmap text
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParseOptions {
    pub reference: ReferenceFootprints,
    pub footprint: FootprintSource,
    /// Clamp every element onto this paper when set.
    pub bounds: Option<PaperSize>,
}
