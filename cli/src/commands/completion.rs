use std::io::Write;

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::Opt;

#[derive(Parser, Debug)]
pub struct CompletionOpt {
    /// Shell to generate the completion script for
    #[arg(value_enum)]
    shell: Shell,
}

/// Write the completion script of the whole command line for a shell
fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut command = Opt::command();
    let name = command.get_name().to_owned();
    debug!(%shell, %name, "Generating completions");
    generate(shell, &mut command, name, out);
}

impl CompletionOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        write_completions(self.shell, &mut std::io::stdout().lock());
        Ok(())
    }
}
