//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod export;
pub mod hex_utils;
pub mod import;
pub mod infer;
pub mod tables;
