//! Magento installer invocation.
//!
//! Builds the `install.php` command line from the install parameters and runs
//! it as a child process, forwarding its output to the console.

use crate::models::params::InstallParameters;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Installer script name, relative to the Magento root.
const INSTALL_SCRIPT: &str = "install.php";

/// A fully built installer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    /// Program to run.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl fmt::Display for InstallCommand {
    /// Renders the command as `php -f <root>/install.php -- --key "value" ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;

        let mut args = self.args.iter();
        let mut in_options = false;
        while let Some(arg) = args.next() {
            if in_options && arg.starts_with("--") {
                let value = args.next().map(String::as_str).unwrap_or("");
                write!(f, " {} \"{}\"", arg, value)?;
            } else {
                write!(f, " {}", arg)?;
            }
            if arg == "--" {
                in_options = true;
            }
        }

        Ok(())
    }
}

/// Build the installer command for a Magento root.
pub fn build_command(
    php_binary: &str,
    magento_root: &Path,
    params: &InstallParameters,
) -> Result<InstallCommand> {
    let script = magento_root.join(INSTALL_SCRIPT);

    let mut args = vec![
        "-f".to_string(),
        script.display().to_string(),
        "--".to_string(),
    ];

    for (key, value) in params.installer_arguments()? {
        args.push(format!("--{}", key));
        args.push(value);
    }

    Ok(InstallCommand {
        program: php_binary.to_string(),
        args,
    })
}

/// Check if the PHP binary can be run.
pub fn is_php_installed(php_binary: &str) -> bool {
    std::process::Command::new(php_binary)
        .arg("-v")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Get the PHP version line.
pub fn php_version(php_binary: &str) -> Result<String> {
    let output = std::process::Command::new(php_binary).arg("-v").output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("unknown");

    Ok(first_line.to_string())
}

/// Forward lines from a child stream to stdout.
///
/// Output is not required to be UTF-8; invalid bytes are replaced.
async fn forward<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<()> {
    let Some(reader) = reader else {
        return Ok(());
    };

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        println!("{}", line.trim_end_matches(['\r', '\n']));
    }
}

/// Run the installer, failing if it exits unsuccessfully or exceeds the timeout.
pub async fn run(command: &InstallCommand, timeout: Duration) -> Result<()> {
    tracing::info!("Running installer: {}", command);

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let outcome = tokio::time::timeout(timeout, async {
        let (out, err, status) = tokio::join!(forward(stdout), forward(stderr), child.wait());
        out?;
        err?;
        status
    })
    .await;

    match outcome {
        Ok(status) => {
            let status = status?;
            if status.success() {
                tracing::info!("Installer finished");
                Ok(())
            } else {
                tracing::error!("Installer exited with {}", status);
                Err(Error::InstallerFailed(command.to_string()))
            }
        }
        Err(_) => {
            child.kill().await?;
            Err(Error::InstallerTimeout(timeout.as_secs()))
        }
    }
}
