//! Recognizers for the ZPL subset written by `label-writer`. This is not a
//! general ZPL interpreter: each field family has one anchored recognizer
//! and anything else is skipped.

mod commands;
mod error;
mod parse;

pub use commands::*;
pub use error::*;
pub use parse::{
    FIELD_HEX_INDICATOR, code128_field, decode_field_hex, label_body, parse_field, parse_zpl,
    qr_field, table_field, text_field,
};
