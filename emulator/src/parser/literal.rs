//! Parse number literals.
//!
//! It parses base 10, base 16 (prefixed by `0x`), base 8 (prefixed by `0o`) and base 2 (prefixed
//! by `0b`) number literals, with an optional `-` sign.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::char,
    combinator::{map, opt},
    error::{context, ErrorKind, FromExternalError},
    sequence::pair,
    IResult,
};

use super::ParseError;

/// Check if character is a decimal digit
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Check if character is a hexadecimal digit
fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Check if character is an octal digit
fn is_oct_digit(c: char) -> bool {
    c.is_digit(8)
}

/// Check if character is a binary digit
fn is_bin_digit(c: char) -> bool {
    c.is_digit(2)
}

/// Parse a number with the given radix, applying the sign. The digits are
/// parsed along with their sign so that `i128::MIN` is reachable.
fn from_radix(negative: bool, digits: &str, radix: u32) -> Result<i128, std::num::ParseIntError> {
    if negative {
        i128::from_str_radix(&format!("-{digits}"), radix)
    } else {
        i128::from_str_radix(digits, radix)
    }
}

/// Extract the digits of a literal after its base prefix
fn take_prefixed<'a, Error: ParseError<&'a str>>(
    prefix: &'static str,
    is_digit: fn(char) -> bool,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str, Error> {
    move |input: &'a str| {
        let (input, _) = tag_no_case(prefix)(input)?;
        take_while1(is_digit)(input)
    }
}

/// Extract the digits of an unsigned literal in any base, along with its radix
fn parse_digits<'a, Error: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (&'a str, u32), Error> {
    alt((
        map(take_prefixed("0x", is_hex_digit), |digits| (digits, 16)),
        map(take_prefixed("0o", is_oct_digit), |digits| (digits, 8)),
        map(take_prefixed("0b", is_bin_digit), |digits| (digits, 2)),
        map(take_while1(is_digit), |digits| (digits, 10)),
    ))(input)
}

/// Parse a number literal
///
/// Literals hold any word along with its sign, range checks happen when the
/// operand is encoded. Literals overflowing an `i128` fail without
/// backtracking.
pub(crate) fn parse_literal<'a, Error: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, i128, Error> {
    context("number literal", |input: &'a str| {
        let (rest, (sign, (digits, radix))) = pair(opt(char('-')), parse_digits::<Error>)(input)?;
        match from_radix(sign.is_some(), digits, radix) {
            Ok(value) => Ok((rest, value)),
            Err(e) => Err(nom::Err::Failure(FromExternalError::from_external_error(
                input,
                ErrorKind::MapRes,
                e,
            ))),
        }
    })(input)
}
