//! PHP preflight check.

use super::CheckResult;
use crate::core::installer;

/// Check if the PHP binary is installed.
pub fn check(php_binary: &str) -> CheckResult {
    if installer::is_php_installed(php_binary) {
        match installer::php_version(php_binary) {
            Ok(version) => CheckResult::ok("php", &format!("installed ({})", version)),
            Err(_) => CheckResult::ok("php", "installed"),
        }
    } else {
        CheckResult::fail(
            "php",
            &format!("'{}' not found", php_binary),
            "Install PHP CLI: sudo apt install php-cli",
        )
    }
}
