use std::fmt::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueHint};
use tinyisa_emulator::codec::Decoder;

use super::read_binary;

#[derive(Parser, Debug)]
pub struct DisassembleOpt {
    /// Binary program
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,
}

/// Print each instruction with its offset and raw bytes
fn disassemble(program: &[u8]) -> anyhow::Result<String> {
    let mut out = String::new();
    for res in Decoder::new(program) {
        let (offset, instruction) = res?;
        let raw = &program[offset..offset + instruction.size()];
        let hex: Vec<_> = raw.iter().map(|byte| format!("{byte:02x}")).collect();
        writeln!(out, "{offset:#06x}  {:<23}  {instruction}", hex.join(" "))?;
    }
    Ok(out)
}

impl DisassembleOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        let program = read_binary(&self.input)?;
        print!("{}", disassemble(&program)?);
        Ok(())
    }
}
