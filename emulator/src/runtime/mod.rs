use thiserror::Error;
use tracing::{debug, info};

use crate::codec::{decode, DecodeError};
use crate::constants::Word;

mod instructions;
mod memory;
mod snapshot;

pub use self::instructions::rotate_right;
pub use self::memory::Memory;
pub use self::snapshot::{Cell, Snapshot};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("address overflow: {base} + {offset} does not fit in an address")]
    AddressOverflow { base: Word, offset: Word },

    #[error("step limit exceeded ({limit} instructions)")]
    StepLimitExceeded { limit: usize },
}

type Result<T> = std::result::Result<T, ProcessorError>;

/// What happened after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction was executed
    Continue,

    /// The instruction pointer is past the end of the program
    Halted,
}

/// Runs a binary program
///
/// The program is read directly from its encoded form: the instruction
/// pointer is a byte offset in the program, and it only ever moves forward.
pub struct Computer<'a> {
    program: &'a [u8],
    memory: Memory,
    ip: usize,
    steps: usize,
}

impl std::fmt::Debug for Computer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Computer {{ ip: {}, steps: {}, program: [{} bytes], memory: [...] }}",
            self.ip,
            self.steps,
            self.program.len()
        )
    }
}

impl<'a> Computer<'a> {
    /// Create a computer with an empty memory, ready to execute the program
    /// from its beginning
    #[must_use]
    pub fn new(program: &'a [u8]) -> Self {
        Self {
            program,
            memory: Memory::default(),
            ip: 0,
            steps: 0,
        }
    }

    /// Memory of the computer, only changed by executing instructions
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Offset of the next instruction in the program
    #[must_use]
    pub const fn ip(&self) -> usize {
        self.ip
    }

    /// Number of instructions executed so far
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Check if the instruction pointer went past the end of the program
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.ip >= self.program.len()
    }

    /// Fetch, decode and execute the next instruction
    ///
    /// # Errors
    ///
    /// Fails if the instruction can't be decoded or executed. The instruction
    /// pointer is left on the faulty instruction.
    #[tracing::instrument(skip(self), fields(ip = self.ip), level = "debug")]
    pub fn step(&mut self) -> Result<StepOutcome> {
        let Some((instruction, size)) = decode(self.program, self.ip)? else {
            debug!("Reached end of program");
            return Ok(StepOutcome::Halted);
        };

        debug!(size, "Executing instruction \"{}\"", instruction);
        instruction.execute(&mut self.memory)?;
        self.ip += size;
        self.steps += 1;
        Ok(StepOutcome::Continue)
    }

    /// Run the program until its end
    ///
    /// # Errors
    ///
    /// Fails on the first instruction that can't be decoded or executed.
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> Result<()> {
        while self.step()? == StepOutcome::Continue {}
        info!(steps = self.steps, "End of program");
        Ok(())
    }

    /// Run the program until its end, executing at most `limit` instructions
    ///
    /// # Errors
    ///
    /// Fails on the first instruction that can't be decoded or executed, or
    /// if the program did not end within the limit.
    #[tracing::instrument(skip(self))]
    pub fn run_with_limit(&mut self, limit: usize) -> Result<()> {
        loop {
            if self.is_halted() {
                info!(steps = self.steps, "End of program");
                return Ok(());
            }

            if self.steps >= limit {
                return Err(ProcessorError::StepLimitExceeded { limit });
            }

            self.step()?;
        }
    }

    /// Consume the computer, keeping its memory
    #[must_use]
    pub fn into_memory(self) -> Memory {
        self.memory
    }
}

/// Run a program on a fresh computer and return its memory
///
/// # Errors
///
/// Fails on the first instruction that can't be decoded or executed.
pub fn execute(program: &[u8]) -> Result<Memory> {
    let mut computer = Computer::new(program);
    computer.run()?;
    Ok(computer.into_memory())
}
