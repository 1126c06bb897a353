use std::fmt::Display;

/// Characters of remaining input quoted in a syntax error.
const CONTEXT_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("missing label envelope, expected ^XA ... ^XZ")]
    MissingEnvelope,
    #[error("invalid syntax near {near:?}")]
    InvalidSyntax { near: String },
}

impl<T: Display> From<nom::Err<nom::error::Error<T>>> for ParseError {
    fn from(value: nom::Err<nom::error::Error<T>>) -> Self {
        let near = match value {
            nom::Err::Error(err) | nom::Err::Failure(err) => {
                err.input.to_string().chars().take(CONTEXT_CHARS).collect()
            }
            // recognizers are built from complete combinators
            nom::Err::Incomplete(_) => String::new(),
        };
        ParseError::InvalidSyntax { near }
    }
}
