//! Magento Installer CLI
//!
//! A command-line tool for installing Magento and preparing its sample data.

use clap::Parser;
use magento_installer::cli::{
    args::{Cli, Commands},
    commands::{install, split},
};
use magento_installer::models::config::{self, Config};
use magento_installer::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config();

    match cli.command {
        Commands::Split {
            dump,
            delimiter,
            output,
            format,
        } => {
            split::split_dump(
                &dump,
                delimiter.unwrap_or(config.sample.delimiter),
                output.as_deref(),
                format,
            )?;
        }

        Commands::Install {
            params,
            magento_root,
            sample_dir,
            statements_out,
            yes,
            dry_run,
        } => {
            // Run preflight checks unless skipped
            if !cli.skip_preflight && !dry_run {
                run_preflight_checks(&config)?;
            }

            let options = install::InstallOptions {
                params_file: &params,
                magento_root: &magento_root,
                sample_dir: sample_dir.as_deref(),
                statements_out: statements_out.as_deref(),
                yes,
                dry_run,
            };
            install::install(&options, &config).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("magento_installer=debug")
    } else {
        EnvFilter::new("magento_installer=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config);
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
