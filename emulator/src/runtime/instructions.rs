use tracing::debug;

use super::{memory::Memory, ProcessorError};
use crate::constants::{Word, ROTATE_WIDTH};
use crate::instruction::Instruction;

/// Rotate a word to the right. The shift amount is taken modulo the word
/// width, so a shift of 64 leaves the value untouched.
#[must_use]
pub fn rotate_right(value: Word, shift: Word) -> Word {
    // Always lower than 64
    #[allow(clippy::cast_possible_truncation)]
    let shift = (shift % Word::from(ROTATE_WIDTH)) as u32;
    value.rotate_right(shift)
}

impl Instruction {
    /// Execute the instruction
    #[tracing::instrument(skip(memory), level = "trace")]
    pub(crate) fn execute(&self, memory: &mut Memory) -> Result<(), ProcessorError> {
        match *self {
            Self::Ld { b, c } => {
                memory.set(b, c);
            }

            Self::Rd { b, c } => {
                let value = memory.get(b);
                debug!("[{}] = {} -> [{}]", b, value, c);
                memory.set(c, value);
            }

            Self::Wr { b, c, d } => {
                let base = memory.get(d);
                let address = base
                    .checked_add(b)
                    .ok_or(ProcessorError::AddressOverflow { base, offset: b })?;
                let value = memory.get(c);
                debug!("[{}] = {} -> [{} + {}]", c, value, base, b);
                memory.set(address, value);
            }

            Self::Bir { b, c, d } => {
                let shift = memory.get(b);
                let value = memory.get(c);
                let res = rotate_right(value, shift);
                debug!("{:#x} >>> {} = {:#x}", value, shift, res);
                memory.set(d, res);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_right_test() {
        assert_eq!(rotate_right(1, 4), 0x1000_0000_0000_0000);
        assert_eq!(rotate_right(1, 1), 0x8000_0000_0000_0000);
        assert_eq!(rotate_right(0xF0, 4), 0x0F);
        assert_eq!(rotate_right(0x1234, 0), 0x1234);
        assert_eq!(rotate_right(0x1234, 64), 0x1234);
        assert_eq!(rotate_right(0x1234, 64 + 4), 0x4000_0000_0000_0123);
        assert_eq!(rotate_right(u64::MAX, 13), u64::MAX);
        assert_eq!(rotate_right(1, u64::MAX), 2);
    }

    #[test]
    fn ld_test() {
        let mut memory = Memory::new();
        Instruction::Ld { b: 5, c: 42 }
            .execute(&mut memory)
            .unwrap();
        assert_eq!(memory.get(5), 42);
    }

    #[test]
    fn rd_test() {
        let mut memory: Memory = [(1, 9)].into_iter().collect();
        Instruction::Rd { b: 1, c: 2 }.execute(&mut memory).unwrap();
        Instruction::Rd { b: 3, c: 1 }.execute(&mut memory).unwrap();
        assert_eq!(memory.get(2), 9);
        // Copying an unset cell writes a zero
        assert_eq!(memory.get(1), 0);
    }

    #[test]
    fn wr_test() {
        let mut memory: Memory = [(0, 100), (1, 3)].into_iter().collect();
        Instruction::Wr { b: 1, c: 0, d: 1 }
            .execute(&mut memory)
            .unwrap();
        assert_eq!(memory.get(4), 100);
    }

    #[test]
    fn wr_overflow_test() {
        let mut memory: Memory = [(0, u64::MAX)].into_iter().collect();
        let res = Instruction::Wr { b: 1, c: 0, d: 0 }.execute(&mut memory);
        assert!(matches!(
            res,
            Err(ProcessorError::AddressOverflow {
                base: u64::MAX,
                offset: 1
            })
        ));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn bir_test() {
        let mut memory: Memory = [(0, 1), (1, 4)].into_iter().collect();
        Instruction::Bir { b: 1, c: 0, d: 2 }
            .execute(&mut memory)
            .unwrap();
        assert_eq!(memory.get(2), 0x1000_0000_0000_0000);
    }
}
