use tracing::trace;

use super::{EncodeError, ProgramEncodeError};
use crate::constants::Word;
use crate::instruction::Instruction;

/// Pack an instruction into its word, checking that every field fits
fn pack(instruction: &Instruction) -> Result<Word, EncodeError> {
    let format = instruction.format();
    let mut word = Word::from(format.opcode);

    for layout in format.fields {
        let value = instruction.field(layout.field).unwrap_or_default();
        if !layout.fits(value) {
            return Err(EncodeError::FieldOutOfRange {
                field: layout.field,
                mnemonic: format.mnemonic,
                value: value.into(),
                max: layout.max(),
            });
        }

        word |= value << layout.offset;
    }

    Ok(word)
}

/// Encode an instruction at the end of a buffer
///
/// # Errors
///
/// Fails if one of the fields does not fit in its layout. The buffer is left
/// untouched in this case.
pub fn encode_into(instruction: &Instruction, buffer: &mut Vec<u8>) -> Result<(), EncodeError> {
    let word = pack(instruction)?;
    let size = instruction.size();
    trace!(%instruction, word = format_args!("{word:#018x}"), size, "Encoded instruction");
    buffer.extend_from_slice(&word.to_le_bytes()[..size]);
    Ok(())
}

/// Encode a single instruction
///
/// # Errors
///
/// Fails if one of the fields does not fit in its layout.
pub fn encode(instruction: &Instruction) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::with_capacity(instruction.size());
    encode_into(instruction, &mut buffer)?;
    Ok(buffer)
}

/// Encode a whole program
///
/// # Errors
///
/// Fails on the first instruction that can't be encoded.
#[tracing::instrument(skip_all, fields(instructions = instructions.len()))]
pub fn encode_program(instructions: &[Instruction]) -> Result<Vec<u8>, ProgramEncodeError> {
    let mut buffer = Vec::with_capacity(instructions.iter().map(Instruction::size).sum());
    for (index, instruction) in instructions.iter().enumerate() {
        encode_into(instruction, &mut buffer)
            .map_err(|source| ProgramEncodeError { index, source })?;
    }
    Ok(buffer)
}
