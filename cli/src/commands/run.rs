use std::io::BufWriter;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Args, Parser, ValueHint};
use tinyisa_emulator::Computer;
use tracing::info;

use super::read_binary;
use crate::render::{render, OutputFormat};

/// Options controlling how the program runs and how its memory is dumped
#[derive(Args, Debug)]
pub struct SnapshotOpt {
    /// First address of the memory dump
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last address of the memory dump, included
    #[arg(long, default_value_t = 15)]
    end: u64,

    /// Format of the memory dump
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the memory dump to a file instead of the standard output
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<Utf8PathBuf>,

    /// Stop with an error after executing this many instructions
    #[arg(long)]
    max_steps: Option<usize>,
}

impl SnapshotOpt {
    /// Run the program and dump its memory
    pub(super) fn run(&self, program: &[u8]) -> anyhow::Result<()> {
        let mut computer = Computer::new(program);

        info!("Running program");
        match self.max_steps {
            Some(limit) => computer.run_with_limit(limit),
            None => computer.run(),
        }
        .with_context(|| format!("program stopped at offset {:#x}", computer.ip()))?;

        let snapshot = computer.memory().snapshot(self.start, self.end);
        if let Some(ref path) = self.output {
            let file =
                std::fs::File::create(path).with_context(|| format!("could not create {path}"))?;
            render(&snapshot, self.format, BufWriter::new(file))
                .with_context(|| format!("could not write {path}"))?;
            info!(%path, cells = snapshot.len(), "Wrote memory dump");
        } else {
            render(&snapshot, self.format, BufWriter::new(std::io::stdout().lock()))?;
        }

        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct RunOpt {
    /// Binary program
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,

    #[command(flatten)]
    snapshot: SnapshotOpt,
}

impl RunOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        let program = read_binary(&self.input)?;
        self.snapshot.run(&program)
    }
}
