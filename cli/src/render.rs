use std::io::Write;

use clap::ValueEnum;
use tinyisa_emulator::runtime::Snapshot;

/// Format of a memory dump
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `address: value` line per cell
    #[default]
    Text,

    /// XML document with one `cell` element per address
    Xml,

    /// Comma-separated values with an `address,value` header
    Csv,

    /// JSON object with the range and the list of cells
    Json,
}

/// Write a memory snapshot in the given format. Cells are written one by one
/// as they are read from memory.
pub fn render<W: Write>(
    snapshot: &Snapshot,
    format: OutputFormat,
    mut out: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for cell in snapshot.cells() {
                writeln!(out, "{cell}")?;
            }
        }
        OutputFormat::Xml => {
            writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
            writeln!(
                out,
                r#"<memory start="{}" end="{}">"#,
                snapshot.start(),
                snapshot.end()
            )?;
            for (address, value) in snapshot.iter() {
                writeln!(out, r#"  <cell address="{address}">{value}</cell>"#)?;
            }
            writeln!(out, "</memory>")?;
        }
        OutputFormat::Csv => {
            writeln!(out, "address,value")?;
            for (address, value) in snapshot.iter() {
                writeln!(out, "{address},{value}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, snapshot)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
