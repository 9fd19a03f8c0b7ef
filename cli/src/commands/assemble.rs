use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, ValueHint};
use tracing::info;

use super::{assemble_source, read_source};

#[derive(Parser, Debug)]
pub struct AssembleOpt {
    /// Input file
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,

    /// Output file. Defaults to the input file with a `.bin` extension
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    out: Option<Utf8PathBuf>,
}

impl AssembleOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        let source = read_source(&self.input)?;
        let bytes = assemble_source(&self.input, &source)?;

        let out = self
            .out
            .unwrap_or_else(|| self.input.with_extension("bin"));
        std::fs::write(&out, &bytes).with_context(|| format!("could not write {out}"))?;
        info!(path = %out, size = bytes.len(), "Wrote binary");

        Ok(())
    }
}
