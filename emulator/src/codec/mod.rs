//! Binary encoding of instructions
//!
//! A program is the plain concatenation of its encoded instructions, without
//! any header, padding or alignment. Each instruction is a little-endian word
//! of 6 to 8 bytes, laid out as described in the [`catalog`](crate::catalog).

use thiserror::Error;

use crate::catalog::{Field, Mnemonic};
use crate::constants::{Opcode, Word};

mod decode;
mod encode;

pub use self::decode::{decode, decode_program, Decoder};
pub use self::encode::{encode, encode_into, encode_program};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown mnemonic {mnemonic:?}")]
    UnknownMnemonic { mnemonic: String },

    #[error("value {value} out of range for field {field} of {mnemonic} (max {max})")]
    FieldOutOfRange {
        field: Field,
        mnemonic: Mnemonic,
        value: i128,
        max: Word,
    },

    #[error("too many operands for {mnemonic}: expected at most {expected}, got {got}")]
    TooManyOperands {
        mnemonic: Mnemonic,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not encode instruction #{index}")]
pub struct ProgramEncodeError {
    pub index: usize,
    pub source: EncodeError,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown opcode {value} at offset {offset:#x}")]
    UnknownOpcode { value: Opcode, offset: usize },

    #[error("truncated instruction at offset {offset:#x}: needs {size} bytes, {available} available")]
    TruncatedInstruction {
        offset: usize,
        size: usize,
        available: usize,
    },
}

impl DecodeError {
    /// Offset in the program where the error happened
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::UnknownOpcode { offset, .. } | Self::TruncatedInstruction { offset, .. } => {
                *offset
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::CATALOG;
    use crate::instruction::Instruction;

    /// Interesting values for a field: both ends of its range and something in
    /// between
    fn boundary_values(width: u32) -> [Word; 4] {
        let max = (1 << width) - 1;
        [0, 1, max / 3, max]
    }

    #[test]
    fn round_trip_test() {
        for format in &CATALOG {
            let fields: Vec<_> = format.operands().collect();
            for value in fields.iter().flat_map(|layout| boundary_values(layout.width)) {
                // Put the value in every field it fits in, and something else
                // in the others
                for target in &fields {
                    let instruction = Instruction::from_fields(format.mnemonic, |field| {
                        let layout = format.field(field).unwrap();
                        if field == target.field {
                            value & layout.mask()
                        } else {
                            layout.max() / 2
                        }
                    });

                    let bytes = encode(&instruction).unwrap();
                    assert_eq!(bytes.len(), format.size);
                    assert_eq!(decode(&bytes, 0), Ok(Some((instruction, format.size))));
                }
            }
        }
    }

    #[test]
    fn sequential_decode_test() {
        let program = vec![
            Instruction::Ld { b: 0, c: 100 },
            Instruction::Bir {
                b: 0x7_FFFF,
                c: 12,
                d: 0x4_0000,
            },
            Instruction::Rd { b: 3, c: 4 },
            Instruction::Wr { b: 1023, c: 2, d: 1 },
            Instruction::Ld {
                b: 1,
                c: 0xFFFF_FFFF,
            },
        ];

        let bytes = encode_program(&program).unwrap();
        assert_eq!(bytes.len(), 7 + 8 + 6 + 7 + 7);
        assert_eq!(decode_program(&bytes).unwrap(), program);
    }

    #[test]
    fn truncated_test() {
        for format in &CATALOG {
            let instruction = Instruction::from_fields(format.mnemonic, |_| 1);
            let mut bytes = encode(&instruction).unwrap();
            bytes.pop();

            assert_eq!(
                decode(&bytes, 0),
                Err(DecodeError::TruncatedInstruction {
                    offset: 0,
                    size: format.size,
                    available: format.size - 1,
                })
            );
        }
    }

    #[test]
    fn truncated_tail_test() {
        let mut bytes = encode_program(&[
            Instruction::Rd { b: 1, c: 2 },
            Instruction::Ld { b: 1, c: 2 },
        ])
        .unwrap();
        bytes.truncate(6 + 3);

        let mut decoder = Decoder::new(&bytes);
        assert_eq!(
            decoder.next(),
            Some(Ok((0, Instruction::Rd { b: 1, c: 2 })))
        );
        assert_eq!(
            decoder.next(),
            Some(Err(DecodeError::TruncatedInstruction {
                offset: 6,
                size: 7,
                available: 3,
            }))
        );
        assert_eq!(decoder.next(), None);
    }
}
