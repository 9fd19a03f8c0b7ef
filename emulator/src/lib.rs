pub mod assembler;
pub mod catalog;
pub mod codec;
pub mod constants;
pub mod instruction;
pub mod parser;
pub mod runtime;

pub use self::{
    assembler::{assemble, assemble_to_bytes},
    instruction::Instruction,
    parser::parse,
    runtime::{execute, Computer},
};
