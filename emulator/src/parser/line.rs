//! Line parsing
//!
//! Each line holds an optional statement followed by an optional comment.
//! Statements and comments borrow from the source, so every parsed line can
//! be located back in it.

use nom::{
    bytes::complete::is_not,
    character::complete::{char, line_ending, not_line_ending, one_of, space0, space1},
    combinator::{all_consuming, opt, peek},
    error::context,
    multi::separated_list1,
    sequence::{delimited, preceded},
    IResult,
};

use super::{
    literal::parse_literal,
    location::{Locatable, Located},
    parse_identifier, ParseError,
};

/// An instruction, as written in the source
#[derive(Clone, Debug, PartialEq)]
pub struct Statement<'a> {
    pub mnemonic: &'a str,
    pub operands: Vec<i128>,
}

impl std::fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First write the mnemonic
        write!(f, "{:3}", self.mnemonic.to_ascii_uppercase())?;

        // then the list of operands
        let mut first = true; // This is to properly show comma between operands
        for operand in &self.operands {
            if !first {
                write!(f, ",")?;
            }
            write!(f, " {operand}")?;
            first = false;
        }
        Ok(())
    }
}

/// Holds a whole line, with the statement (if any) and the comment (if any).
///
/// Note that the `Default::default()` implementation represents an empty line.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Line<'a> {
    pub statement: Option<Statement<'a>>,
    pub comment: Option<&'a str>,
}

impl std::fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref statement) = self.statement {
            write!(f, "    {statement}")?;
        }

        if let Some(comment) = self.comment {
            if self.statement.is_some() {
                write!(f, "\t{comment}")?;
            } else {
                write!(f, "{comment}")?;
            }
        }

        Ok(())
    }
}

impl<'a> Line<'a> {
    #[cfg(test)] // Only used in tests for now
    pub(crate) fn comment(mut self, comment: &'a str) -> Self {
        self.comment = Some(comment);
        self
    }

    #[cfg(test)] // Only used in tests for now
    pub(crate) fn statement(mut self, mnemonic: &'a str, operands: Vec<i128>) -> Self {
        self.statement = Some(Statement { mnemonic, operands });
        self
    }
}

/// A parsed program, line by line
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program<'a> {
    pub lines: Vec<Located<Line<'a>>>,
}

impl<'a> Program<'a> {
    /// Iterate over the statements of the program, with their line number
    /// (starting at 1) and location
    pub fn statements(&self) -> impl Iterator<Item = (usize, &Located<Line<'a>>, &Statement<'a>)> {
        self.lines.iter().enumerate().filter_map(|(index, line)| {
            line.inner
                .statement
                .as_ref()
                .map(|statement| (index + 1, line, statement))
        })
    }
}

impl std::fmt::Display for Program<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Parses an instruction
fn parse_statement<'a, Error: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Statement<'a>, Error> {
    let (input, mnemonic) = context("mnemonic", parse_identifier)(input)?;
    let (input, operands) = opt(preceded(
        space1,
        separated_list1(delimited(space0, char(','), space0), parse_literal),
    ))(input)?;
    let operands = operands.unwrap_or_default();
    Ok((input, Statement { mnemonic, operands }))
}

/// Parses an inline comment, starting with `#` or `;`
fn parse_comment<'a, Error: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, Error> {
    let (input, _) = peek(one_of("#;"))(input)?;
    not_line_ending(input)
}

/// Parses a whole line
fn parse_line<'a, Error: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Line<'a>, Error> {
    let (input, _) = space0(input)?;

    // Extract the line content
    let (input, statement) = opt(parse_statement)(input)?;
    let (input, _) = space0(input)?;

    // Extract the comment
    let (input, comment) = opt(parse_comment)(input)?;

    Ok((input, Line { statement, comment }))
}

/// Split the input in lines, keeping empty ones
fn split_lines<'a, Error: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Vec<&'a str>, Error> {
    separated_list1(line_ending, |input: &'a str| {
        opt(is_not("\r\n"))(input).map(|(rest, line)| (rest, line.unwrap_or(&input[..0])))
    })(input)
}

pub(crate) fn parse_program<'a, Error: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Program<'a>, Error> {
    let (rest, raw_lines) = split_lines(input)?;
    let lines: Result<_, _> = raw_lines
        .into_iter()
        .map(|raw| {
            context("line", all_consuming(parse_line))(raw)
                .map(|(_, line)| line.with_location((input, raw)))
        })
        .collect();
    Ok((rest, Program { lines: lines? }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::location::Location;

    type E<'a> = nom::error::VerboseError<&'a str>;

    #[track_caller]
    fn fully_parsed<T>(result: IResult<&str, T, E<'_>>) -> T {
        let (input, result) = result.unwrap();
        assert_eq!(input, "");
        result
    }

    #[test]
    fn parse_empty_line_test() {
        let line = fully_parsed(parse_line(""));
        assert_eq!(line, Line::default());

        let line = fully_parsed(parse_line("   \t "));
        assert_eq!(line, Line::default());
    }

    #[test]
    fn parse_comment_line_test() {
        let line = fully_parsed(parse_line("# hello"));
        assert_eq!(line, Line::default().comment("# hello"));

        let line = fully_parsed(parse_line("  ; hello"));
        assert_eq!(line, Line::default().comment("; hello"));
    }

    #[test]
    fn parse_statement_line_test() {
        let line = fully_parsed(parse_line("LD 5, 42"));
        assert_eq!(line, Line::default().statement("LD", vec![5, 42]));

        let line = fully_parsed(parse_line("  wr 1 ,0,  0x1   # indexed store"));
        assert_eq!(
            line,
            Line::default()
                .statement("wr", vec![1, 0, 1])
                .comment("# indexed store")
        );

        let line = fully_parsed(parse_line("bir"));
        assert_eq!(line, Line::default().statement("bir", vec![]));
    }

    #[test]
    fn parse_invalid_line_test() {
        assert!(all_consuming(parse_line::<E>)("LD 5,").is_err());
        assert!(all_consuming(parse_line::<E>)("LD five").is_err());
        assert!(all_consuming(parse_line::<E>)("LD 5 42").is_err());
        assert!(all_consuming(parse_line::<E>)("5, 42").is_err());
    }

    #[test]
    fn split_lines_test() {
        let input = "LD 1, 2\n\nRD 1, 2\r\n# end";
        let lines = fully_parsed(split_lines(input));
        assert_eq!(lines, vec!["LD 1, 2", "", "RD 1, 2", "# end"]);

        let lines = fully_parsed(split_lines(""));
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn parse_program_test() {
        let input = "LD 5, 42 # store\n\n  rd 5, 6\n";

        let program = fully_parsed(parse_program(input));
        assert_eq!(
            program,
            Program {
                lines: vec![
                    Line::default()
                        .statement("LD", vec![5, 42])
                        .comment("# store")
                        .with_location(Location::new(0, 16)),
                    Line::default().with_location(Location::new(17, 0)),
                    Line::default()
                        .statement("rd", vec![5, 6])
                        .with_location(Location::new(18, 9)),
                    Line::default().with_location(Location::new(28, 0)),
                ]
            }
        );

        let statements: Vec<_> = program
            .statements()
            .map(|(number, line, statement)| (number, line.location, statement.mnemonic))
            .collect();
        assert_eq!(
            statements,
            vec![
                (1, Location::new(0, 16), "LD"),
                (3, Location::new(18, 9), "rd"),
            ]
        );
    }

    #[test]
    fn display_test() {
        let input = "ld 5,42 # store\n# comment\nbir 1,0,2";
        let program = fully_parsed(parse_program(input));
        assert_eq!(
            program.to_string(),
            "    LD  5, 42\t# store\n# comment\n    BIR 1, 0, 2\n"
        );
    }
}
