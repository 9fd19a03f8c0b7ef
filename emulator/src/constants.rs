pub type Address = u64;
pub type Word = u64;
pub type Opcode = u8;

/// Number of low bits of every encoded instruction holding the opcode
pub(crate) const OPCODE_WIDTH: u32 = 5;

/// Bit offset of the first operand field, right after the opcode
pub(crate) const FIRST_FIELD_OFFSET: u32 = OPCODE_WIDTH;

/// Width of the rotation performed by `BIR`
pub(crate) const ROTATE_WIDTH: u32 = Word::BITS;

/// Largest encoded instruction, in bytes
pub(crate) const MAX_INSTRUCTION_SIZE: usize = 8;
