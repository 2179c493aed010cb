//! Split command implementation.
//!
//! Strips remarks from a SQL dump and writes its statements in order.

use crate::cli::args::OutputFormat;
use crate::core::sample;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Split a SQL dump into statements.
pub fn split_dump(
    dump: &Path,
    delimiter: char,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let report = sample::prepare_statements(dump, delimiter)?;

    if let Some(ref tail) = report.unterminated {
        eprintln!(
            "{} unterminated literal at end of script, {} bytes dropped",
            "[WARNING]".bold().yellow(),
            tail.len()
        );
    }

    match (output, format) {
        (Some(path), OutputFormat::Text) => {
            sample::write_statements(&report.statements, delimiter, path)?;
        }
        (Some(path), OutputFormat::Json) => {
            sample::write_statements_json(&report.statements, path)?;
        }
        (None, OutputFormat::Text) => {
            println!("{}", sample::render_statements(&report.statements, delimiter));
        }
        (None, OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&report.statements)?);
        }
    }

    if let Some(path) = output {
        eprintln!(
            "{} {} statements written to {}",
            "[OK]".bold().green(),
            report.statements.len(),
            path.display()
        );
    }

    Ok(())
}
