//! Configuration for envreplace.
//!
//! This module handles:
//! - TOML config file parsing
//! - Layering command-line, environment and file settings
//! - Validating the final settings

pub mod parser;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use types::{PartialSettings, Settings};
