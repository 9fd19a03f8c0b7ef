#![forbid(unsafe_code)]

use std::io::IsTerminal;
use std::process::exit;

use clap::{ArgAction, ArgGroup, Parser};
use tracing::error;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;
mod render;

use crate::commands::Subcommand;

#[derive(Parser)]
#[command(name = "tinyisa", version, author, about, group = ArgGroup::new("log-format"))]
struct Opt {
    /// Increase the level of verbosity. Can be used multiple times.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Force colored output. Default is to check if the output is a tty
    #[arg(short = 'c', long, global = true, group = "log-format")]
    color: bool,

    /// Force non-colored output. Default is to check if the output is a tty
    #[arg(short = 'C', long, global = true, group = "log-format")]
    no_color: bool,

    /// Use JSON output for log messages
    #[arg(short, long, global = true, group = "log-format")]
    json: bool,

    #[command(subcommand)]
    command: Subcommand,
}

impl Opt {
    const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "tinyisa_emulator=debug,tinyisa=debug,info",
            2 => "tinyisa_emulator=trace,tinyisa=trace,info",
            3 => "tinyisa_emulator=trace,tinyisa=trace,debug",
            4..=u8::MAX => "trace",
        }
    }

    fn should_use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            std::io::stderr().is_terminal()
        }
    }

    fn filter_layer(&self) -> EnvFilter {
        // Parse log level from env
        EnvFilter::try_from_default_env()
            // or infer from args
            .unwrap_or_else(|_| EnvFilter::new(self.log_filter()))
    }
}

fn main() {
    // First, parse the arguments
    let opt = Opt::parse();

    // Then, setup the tracing formatter for logging and instrumentation.
    // Logs go to stderr, stdout is kept for the program output.
    let registry = tracing_subscriber::Registry::default().with(opt.filter_layer());

    if opt.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        registry.with(json_layer).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .without_time()
            .with_ansi(opt.should_use_colors())
            .with_target(false)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    }

    // And run the command
    let res = opt.command.exec();
    if let Err(e) = res {
        error!("{:#}", e);
        exit(1);
    }
}
