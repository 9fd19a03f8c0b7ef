//! Program parsing logic
//!
//! This module is splitted in multiple submodules to make things easier to
//! read. The parsing is handled by the `nom` library.
//!
//! A program has one instruction per line, made of a mnemonic followed by
//! its comma-separated operands. Comments start with `#` or `;`.
//!
//! ```text
//! LD  0, 1      # memory[0] = 1
//! LD  1, 4
//! BIR 1, 0, 2   ; rotate memory[0] by memory[1]
//! ```

use nom::bytes::complete::take_while1;
use nom::combinator::{all_consuming, verify};
use nom::{Finish, IResult};

mod errors;
pub(crate) mod line;
pub(crate) mod literal;
pub mod location;

pub use self::errors::{describe_error, error_offset, ParseError};
pub use self::line::{Line, Program, Statement};

fn is_identifier_char(c: char) -> bool {
    is_start_identifier_char(c) || c.is_ascii_digit()
}

fn is_start_identifier_char(c: char) -> bool {
    c == '_' || c.is_ascii_lowercase() || c.is_ascii_uppercase()
}

/// Parse a C-like identifier
pub(crate) fn parse_identifier<'a, Error: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, Error> {
    verify(take_while1(is_identifier_char), |f: &str| {
        f.chars()
            .next()
            .filter(|&c| is_start_identifier_char(c))
            .is_some()
    })(input)
}

/// Parse a program
///
/// # Errors
///
/// This function will return an error if the program is invalid
pub fn parse(input: &str) -> Result<Program, nom::error::VerboseError<&str>> {
    parse_new(input)
}

#[doc(hidden)]
pub fn parse_new<'a, Error: ParseError<&'a str>>(input: &'a str) -> Result<Program<'a>, Error> {
    let (_, program) = all_consuming(self::line::parse_program)(input).finish()?;
    Ok(program)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_identifier_test() {
        type R<'a> = IResult<&'a str, &'a str, ()>;
        assert_eq!(parse_identifier("hello"), R::Ok(("", "hello")));
        assert_eq!(parse_identifier("abc123"), R::Ok(("", "abc123")));
        assert_eq!(parse_identifier("123abc"), R::Err(nom::Err::Error(())));
        assert_eq!(parse_identifier("abc_123"), R::Ok(("", "abc_123")));
        assert_eq!(parse_identifier("abc-123"), R::Ok(("-123", "abc")));
    }

    #[test]
    fn parse_program_test() {
        let source = indoc! {"
            # Scenario
            LD 0, 100
            ld 1, 3   ; base address
            WR 1, 0, 1
        "};

        let program = parse(source).unwrap();
        let statements: Vec<_> = program
            .statements()
            .map(|(number, _, statement)| (number, statement.mnemonic, statement.operands.clone()))
            .collect();
        assert_eq!(
            statements,
            vec![
                (2, "LD", vec![0, 100]),
                (3, "ld", vec![1, 3]),
                (4, "WR", vec![1, 0, 1]),
            ]
        );
    }

    #[test]
    fn parse_error_test() {
        let source = "LD 1, 2\nLD 1, ?\n";
        let error = parse(source).unwrap_err();
        // Points right after the last valid operand
        assert_eq!(error_offset(source, &error), Some(12));
        let message = describe_error(source, error);
        assert!(message.contains("line 2"), "{message}");
    }

    #[test]
    fn literal_overflow_error_test() {
        let source = "LD 0, 0x1FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF\n";
        let error = parse(source).unwrap_err();
        assert_eq!(error_offset(source, &error), Some(6));
        let message = describe_error(source, error);
        assert!(message.contains("number literal"), "{message}");
    }
}
