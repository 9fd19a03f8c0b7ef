use std::iter::FusedIterator;

use tracing::trace;

use super::DecodeError;
use crate::catalog::{Format, OPCODE_MASK};
use crate::constants::{Word, MAX_INSTRUCTION_SIZE};
use crate::instruction::Instruction;

/// Decode the instruction starting at `offset` in the buffer.
///
/// Returns the instruction along with its size in bytes, or `None` if the
/// offset is past the end of the buffer.
///
/// # Errors
///
/// Fails if the opcode is unknown, or if the buffer ends in the middle of the
/// instruction.
pub fn decode(buffer: &[u8], offset: usize) -> Result<Option<(Instruction, usize)>, DecodeError> {
    let Some(first) = buffer.get(offset) else {
        return Ok(None);
    };

    let opcode = first & OPCODE_MASK;
    let format =
        Format::from_opcode(opcode).ok_or(DecodeError::UnknownOpcode { value: opcode, offset })?;

    let bytes = buffer
        .get(offset..offset + format.size)
        .ok_or(DecodeError::TruncatedInstruction {
            offset,
            size: format.size,
            available: buffer.len() - offset,
        })?;

    let mut raw = [0; MAX_INSTRUCTION_SIZE];
    raw[..format.size].copy_from_slice(bytes);
    let word = Word::from_le_bytes(raw);

    let instruction = Instruction::from_fields(format.mnemonic, |field| {
        format
            .field(field)
            .map_or(0, |layout| (word >> layout.offset) & layout.mask())
    });
    trace!(offset, word = format_args!("{word:#018x}"), %instruction, "Decoded instruction");

    Ok(Some((instruction, format.size)))
}

/// Walks a program, decoding one instruction after the other
///
/// It yields the offset of each instruction along with the instruction
/// itself, and stops after the first error.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    buffer: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            offset: 0,
            failed: false,
        }
    }

    /// Offset of the next instruction to decode
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<(usize, Instruction), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match decode(self.buffer, self.offset) {
            Ok(Some((instruction, size))) => {
                let offset = self.offset;
                self.offset += size;
                Some(Ok((offset, instruction)))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Decoder<'_> {}

/// Decode a whole program
///
/// # Errors
///
/// Fails on the first instruction that can't be decoded.
pub fn decode_program(buffer: &[u8]) -> Result<Vec<Instruction>, DecodeError> {
    Decoder::new(buffer)
        .map(|res| res.map(|(_offset, instruction)| instruction))
        .collect()
}
