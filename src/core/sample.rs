//! Sample data preparation.
//!
//! Turns the sample SQL dump into an ordered statement list for a database
//! client and copies the sample media tree into the Magento root.

use crate::core::splitter::{self, SplitReport};
use crate::utils::fs::{self, CopyStats};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Read a SQL dump, strip its remarks and split it into statements.
pub fn prepare_statements(dump_path: &Path, delimiter: char) -> Result<SplitReport> {
    fs::ensure_file(dump_path)?;

    let bytes = std::fs::read(dump_path)?;
    let raw = String::from_utf8(bytes).map_err(|e| {
        Error::other(format!(
            "SQL dump {} is not valid UTF-8 (invalid byte at offset {}); convert it to UTF-8 first",
            dump_path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;
    let report = splitter::segment(&raw, delimiter);

    tracing::info!(
        "Prepared {} statements from {}",
        report.statements.len(),
        dump_path.display()
    );

    Ok(report)
}

/// Render statements as a script, each one terminated by the delimiter.
pub fn render_statements(statements: &[String], delimiter: char) -> String {
    let mut script = String::with_capacity(statements.iter().map(|s| s.len() + 1).sum());
    for statement in statements {
        script.push_str(statement);
        script.push(delimiter);
    }
    script
}

/// Write statements to a file, in order.
pub fn write_statements(statements: &[String], delimiter: char, output: &Path) -> Result<()> {
    fs::create_parent_dir(output)?;
    let mut script = render_statements(statements, delimiter);
    script.push('\n');
    std::fs::write(output, script)?;
    tracing::debug!("Wrote {} statements to {}", statements.len(), output.display());
    Ok(())
}

/// Write statements to a file as a JSON array.
pub fn write_statements_json(statements: &[String], output: &Path) -> Result<()> {
    fs::create_parent_dir(output)?;
    let content = serde_json::to_string_pretty(statements)?;
    std::fs::write(output, content)?;
    Ok(())
}

/// Copy the sample media tree into the Magento media directory.
pub fn copy_media(source: &Path, dest: &Path) -> Result<CopyStats> {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));

    let stats = fs::copy_tree(source, dest, |path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(format!("Copying: {}", name));
    })?;

    pb.finish_and_clear();

    tracing::info!(
        "Copied {} files ({} bytes) and {} directories to {}",
        stats.files,
        stats.bytes,
        stats.directories,
        dest.display()
    );

    Ok(stats)
}
