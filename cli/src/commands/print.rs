use camino::Utf8PathBuf;
use clap::{Parser, ValueHint};
use tracing::debug;
use tinyisa_emulator::parse;
use tinyisa_emulator::parser::describe_error;

use super::read_source;

#[derive(Parser, Debug)]
pub struct PrintOpt {
    /// Input file
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,
}

impl PrintOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        let source = read_source(&self.input)?;
        let source = source.as_str();

        debug!("Parsing program");
        let program = parse(source).map_err(|e| anyhow::anyhow!(describe_error(source, e)))?;
        print!("{program}");

        Ok(())
    }
}
