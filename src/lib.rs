//! Magento Installer Library
//!
//! Installs Magento from a parameter file and prepares its sample data by
//! splitting SQL dumps into individually executable statements.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod utils;

pub use error::{Error, Result};
