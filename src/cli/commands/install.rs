//! Install command implementation.
//!
//! Loads the install parameters, prepares sample data when requested and runs
//! the Magento installer.

use crate::core::{installer, sample};
use crate::models::config::Config;
use crate::models::params::InstallParameters;
use crate::utils::fs;
use crate::Result;
use chrono::Local;
use colored::Colorize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Options for the install command.
#[derive(Debug, Clone)]
pub struct InstallOptions<'a> {
    pub params_file: &'a Path,
    pub magento_root: &'a Path,
    pub sample_dir: Option<&'a Path>,
    pub statements_out: Option<&'a Path>,
    pub yes: bool,
    pub dry_run: bool,
}

/// Interpret an answer to a yes/no question.
fn parse_confirmation(answer: &str, default: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

/// Ask the operator to confirm the installation.
fn ask_confirmation(db_name: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(true);
    }

    print!(
        "Do you want to create MySQL database '{}' and install Magento on it [Y,n]? ",
        db_name
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;

    Ok(parse_confirmation(&answer, true))
}

/// Default output path for sample data statements.
fn default_statements_path() -> PathBuf {
    PathBuf::from(format!(
        "sample_statements_{}.sql",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Prepare sample data: write its statements and copy its media.
fn install_sample_data(
    sample_dir: &Path,
    options: &InstallOptions<'_>,
    config: &Config,
) -> Result<()> {
    let dump_path = sample_dir.join(&config.sample.dump_file);
    let delimiter = config.sample.delimiter;

    println!("[INFO] Splitting sample data: {}", dump_path.display());
    let report = sample::prepare_statements(&dump_path, delimiter)?;
    if report.unterminated.is_some() {
        println!(
            "{}",
            "[WARNING] Sample dump ends inside a string literal; the last statement was dropped"
                .yellow()
        );
    }

    let media_source = sample_dir.join(&config.sample.media_dir);
    let media_dest = options.magento_root.join(&config.sample.media_dir);

    if options.dry_run {
        println!(
            "  {} would write {} statements",
            "[DRY RUN]".yellow(),
            report.statements.len()
        );
        println!(
            "  {} would copy {} to {}",
            "[DRY RUN]".yellow(),
            media_source.display(),
            media_dest.display()
        );
        return Ok(());
    }

    let statements_path = options
        .statements_out
        .map(Path::to_path_buf)
        .unwrap_or_else(default_statements_path);
    sample::write_statements(&report.statements, delimiter, &statements_path)?;
    println!(
        "{} {} statements written to {}",
        "[OK]".bold().green(),
        report.statements.len(),
        statements_path.display()
    );

    if media_source.is_dir() {
        let stats = sample::copy_media(&media_source, &media_dest)?;
        println!(
            "{} Copied {} files into {}",
            "[OK]".bold().green(),
            stats.files,
            media_dest.display()
        );
    } else {
        tracing::warn!("Sample media directory not found: {}", media_source.display());
    }

    println!("Sample Data installed");
    Ok(())
}

/// Install Magento.
pub async fn install(options: &InstallOptions<'_>, config: &Config) -> Result<()> {
    println!("{}", "[INSTALL] Installing Magento...".bold().cyan());
    println!();

    fs::ensure_directory(options.magento_root)?;
    fs::ensure_file(options.params_file)?;

    let params = InstallParameters::load(options.params_file)?;
    let db_name = params.db_name()?;

    println!("  {} {}", "Magento root:".bold(), options.magento_root.display());
    println!("  {} {}", "Database:".bold(), db_name);
    println!();

    if !options.yes && !options.dry_run && !ask_confirmation(db_name)? {
        println!("Installation cancelled.");
        return Ok(());
    }

    if let Some(sample_dir) = options.sample_dir {
        if !sample_dir.is_dir() {
            tracing::warn!("Sample directory not found: {}", sample_dir.display());
        } else if params.install_sample() {
            install_sample_data(sample_dir, options, config)?;
        } else {
            tracing::info!("install_sample is not set, skipping sample data");
        }
    }

    let command = installer::build_command(
        &config.installer.php_binary,
        options.magento_root,
        &params,
    )?;

    println!("[INFO] Installer command: {}", command.to_string().cyan());

    if options.dry_run {
        println!("{}", "[DRY RUN] Installer not executed".yellow());
        return Ok(());
    }

    installer::run(&command, Duration::from_secs(config.installer.timeout)).await?;

    println!();
    println!("{}", "[OK] Magento installed".bold().green());
    Ok(())
}
