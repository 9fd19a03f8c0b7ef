use anyhow::Context;
use camino::Utf8Path;
use tracing::{debug, info};
use tinyisa_emulator::parser::{describe_error, error_offset};
use tinyisa_emulator::{assemble_to_bytes, parse};

mod assemble;
mod completion;
mod disassemble;
mod exec;
mod print;
mod run;

#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Assemble a program to its binary form
    Assemble(self::assemble::AssembleOpt),

    /// Run a binary program and dump its memory
    Run(self::run::RunOpt),

    /// Assemble and run a program, without writing the binary
    Exec(self::exec::ExecOpt),

    /// Print the instructions of a binary program
    Disassemble(self::disassemble::DisassembleOpt),

    /// Print the program as parsed
    Print(self::print::PrintOpt),

    /// Generate shell completions
    Completion(self::completion::CompletionOpt),
}

impl Subcommand {
    /// Run a subcommand
    pub fn exec(self) -> anyhow::Result<()> {
        match self {
            Self::Assemble(opt) => opt.exec(),
            Self::Run(opt) => opt.exec(),
            Self::Exec(opt) => opt.exec(),
            Self::Disassemble(opt) => opt.exec(),
            Self::Print(opt) => opt.exec(),
            Self::Completion(opt) => opt.exec(),
        }
    }
}

/// Read a source file
fn read_source(path: &Utf8Path) -> anyhow::Result<String> {
    info!(%path, "Reading program");
    std::fs::read_to_string(path).with_context(|| format!("could not read {path}"))
}

/// Read a binary program
fn read_binary(path: &Utf8Path) -> anyhow::Result<Vec<u8>> {
    info!(%path, "Reading binary");
    std::fs::read(path).with_context(|| format!("could not read {path}"))
}

/// Parse and assemble a program, reporting errors on the source
fn assemble_source(path: &Utf8Path, source: &str) -> anyhow::Result<Vec<u8>> {
    debug!("Parsing program");
    let program = match parse(source) {
        Ok(p) => p,
        Err(e) => {
            let offset = error_offset(source, &e).unwrap_or_default();
            debug!(offset, "{}", describe_error(source, e));
            let labels = vec![miette::LabeledSpan::underline(offset..offset)];
            let report = miette::miette!(labels = labels, "Failed to parse program")
                .with_source_code(miette::NamedSource::new(path, source.to_owned()));
            eprintln!("{report:?}");
            anyhow::bail!("could not parse {path}");
        }
    };

    debug!("Assembling program");
    match assemble_to_bytes(&program) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let labels = vec![miette::LabeledSpan::at(
                e.location().range(),
                e.source.to_string(),
            )];
            let report = miette::miette!(labels = labels, "Failed to assemble program")
                .with_source_code(miette::NamedSource::new(path, source.to_owned()));
            eprintln!("{report:?}");
            Err(e).with_context(|| format!("could not assemble {path}"))
        }
    }
}
