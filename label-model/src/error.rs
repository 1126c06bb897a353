use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("unsupported print resolution: {0} dpi (expected 203, 300 or 600)")]
    UnsupportedDpi(i64),

    #[error("invalid geometry for {element}: {reason}")]
    InvalidGeometry {
        element: &'static str,
        reason: String,
    },

    #[error("{0} payload must not be empty")]
    EmptyPayload(&'static str),

    #[error("table needs at least one row and one column, got {rows}x{cols}")]
    InvalidTable { rows: u32, cols: u32 },
}
