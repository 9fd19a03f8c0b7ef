use std::num::ParseIntError;

use nom::Offset;

pub trait ParseError<I>:
    nom::error::ParseError<I>
    + nom::error::FromExternalError<I, ParseIntError>
    + nom::error::ContextError<I>
{
}

impl<I, E> ParseError<I> for E where
    E: nom::error::ParseError<I>
        + nom::error::FromExternalError<I, ParseIntError>
        + nom::error::ContextError<I>
{
}

/// Find where a parse error happened in the source
///
/// Returns the offset of the innermost error, which is usually the most
/// precise one.
#[must_use]
pub fn error_offset(source: &str, error: &nom::error::VerboseError<&str>) -> Option<usize> {
    error
        .errors
        .first()
        .map(|(input, _kind)| source.offset(input))
}

/// Render a parse error as a human-readable message, with the context of each
/// error
#[must_use]
pub fn describe_error(source: &str, error: nom::error::VerboseError<&str>) -> String {
    nom::error::convert_error(source, error)
}
