//! Core business logic modules.

pub mod installer;
pub mod remarks;
pub mod sample;
pub mod splitter;
