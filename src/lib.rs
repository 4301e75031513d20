//! envreplace - replace `KEY=...` lines in files with environment values.
//!
//! This library provides the core functionality for envreplace, including:
//! - Environment capture and prefix filtering
//! - Line rewriting with a deterministic longest-key-first match order
//! - Staged in-place file updates
//! - Configuration layering and validation
//!
//! # Example
//!
//! ```no_run
//! use envreplace::env::{filter_by_prefix, read_process_env};
//! use envreplace::rewrite::{FailurePolicy, rewrite_files};
//! use std::path::PathBuf;
//!
//! let vars = filter_by_prefix(read_process_env(), &["APP_".to_string()]);
//! let summary = rewrite_files(&[PathBuf::from(".env")], &vars, FailurePolicy::Abort).unwrap();
//!
//! println!("rewrote {} line(s)", summary.lines_rewritten());
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod rewrite;
pub mod version;

pub use error::{EnvReplaceError, ErrorCategory, Result};
