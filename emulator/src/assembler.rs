use thiserror::Error;
use tracing::debug;

use crate::codec::{encode_into, EncodeError};
use crate::instruction::Instruction;
use crate::parser::location::Location;
use crate::parser::Program;

/// An instruction in the program could not be assembled
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not assemble line {line}")]
pub struct AssemblyError {
    /// Line number, starting at 1
    pub line: usize,

    /// Location of the line in the source
    pub location: Location,

    pub source: EncodeError,
}

impl AssemblyError {
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }
}

/// Turn the statements of a parsed program into instructions
///
/// # Errors
///
/// Fails on the first statement with an unknown mnemonic or invalid operands
#[tracing::instrument(skip_all)]
pub fn assemble(program: &Program) -> Result<Vec<Instruction>, AssemblyError> {
    program
        .statements()
        .map(|(line, located, statement)| {
            Instruction::from_operands(statement.mnemonic, &statement.operands).map_err(|source| {
                AssemblyError {
                    line,
                    location: located.location,
                    source,
                }
            })
        })
        .collect()
}

/// Assemble a parsed program down to its binary form
///
/// # Errors
///
/// Fails on the first statement with an unknown mnemonic or invalid operands
#[tracing::instrument(skip_all)]
pub fn assemble_to_bytes(program: &Program) -> Result<Vec<u8>, AssemblyError> {
    let mut buffer = Vec::new();
    for (line, located, statement) in program.statements() {
        let error = |source| AssemblyError {
            line,
            location: located.location,
            source,
        };

        let instruction =
            Instruction::from_operands(statement.mnemonic, &statement.operands).map_err(error)?;
        encode_into(&instruction, &mut buffer).map_err(error)?;
        debug!(line, offset = buffer.len() - instruction.size(), %instruction, "Assembled instruction");
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{Field, Mnemonic};
    use crate::codec::{decode_program, encode_program};
    use crate::parser::parse;

    #[test]
    fn assemble_test() {
        let source = indoc! {"
            LD 5, 42
            # copy it
            rd 5, 6
        "};
        let program = parse(source).unwrap();

        let instructions = assemble(&program).unwrap();
        assert_eq!(
            instructions,
            vec![
                Instruction::Ld { b: 5, c: 42 },
                Instruction::Rd { b: 5, c: 6 },
            ]
        );

        let bytes = assemble_to_bytes(&program).unwrap();
        assert_eq!(bytes, encode_program(&instructions).unwrap());
        assert_eq!(decode_program(&bytes).unwrap(), instructions);
    }

    #[test]
    fn unknown_mnemonic_test() {
        let source = "LD 1, 2\n  JMP 0\n";
        let program = parse(source).unwrap();
        let error = assemble_to_bytes(&program).unwrap_err();
        assert_eq!(error.line, 2);
        assert_eq!(&source[error.location().range()], "  JMP 0");
        assert_eq!(
            error.source,
            EncodeError::UnknownMnemonic {
                mnemonic: "JMP".into()
            }
        );
    }

    #[test]
    fn field_out_of_range_test() {
        let source = "BIR 0, 0x80000, 0\n";
        let program = parse(source).unwrap();
        let error = assemble(&program).unwrap_err();
        assert_eq!(error.line, 1);
        assert!(matches!(
            error.source,
            EncodeError::FieldOutOfRange {
                field: Field::C,
                mnemonic: Mnemonic::Bir,
                value: 0x8_0000,
                ..
            }
        ));
    }

    #[test]
    fn negative_operand_test() {
        let program = parse("LD -1, 0").unwrap();
        let error = assemble(&program).unwrap_err();
        assert!(matches!(
            error.source,
            EncodeError::FieldOutOfRange {
                field: Field::B,
                value: -1,
                ..
            }
        ));
    }

    #[test]
    fn wide_literal_test() {
        let program = parse("LD 0xFFFFFFFFFFFFFFFF, 1").unwrap();
        let error = assemble(&program).unwrap_err();
        assert_eq!(
            error.source,
            EncodeError::FieldOutOfRange {
                field: Field::B,
                mnemonic: Mnemonic::Ld,
                value: 0xFFFF_FFFF_FFFF_FFFF,
                max: 0x7_FFFF,
            }
        );

        // Does not even fit in a word
        let program = parse("rd 1, 0x10000000000000000").unwrap();
        let error = assemble_to_bytes(&program).unwrap_err();
        assert_eq!(
            error.source,
            EncodeError::FieldOutOfRange {
                field: Field::C,
                mnemonic: Mnemonic::Rd,
                value: 1 << 64,
                max: 0x7_FFFF,
            }
        );
    }

    #[test]
    fn extra_operand_test() {
        let program = parse("LD 1, 2, 3").unwrap();
        let error = assemble(&program).unwrap_err();
        assert!(matches!(
            error.source,
            EncodeError::TooManyOperands {
                expected: 2,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn empty_program_test() {
        let program = parse("# nothing to see here\n\n").unwrap();
        assert_eq!(assemble_to_bytes(&program).unwrap(), Vec::<u8>::new());
    }
}
