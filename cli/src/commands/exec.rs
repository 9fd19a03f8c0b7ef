use camino::Utf8PathBuf;
use clap::{Parser, ValueHint};
use tracing::debug;

use super::run::SnapshotOpt;
use super::{assemble_source, read_source};

#[derive(Parser, Debug)]
pub struct ExecOpt {
    /// Input file
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,

    #[command(flatten)]
    snapshot: SnapshotOpt,
}

impl ExecOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        let source = read_source(&self.input)?;
        let program = assemble_source(&self.input, &source)?;
        debug!(size = program.len(), "Assembled program");
        self.snapshot.run(&program)
    }
}
