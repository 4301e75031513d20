//! In-place rewriting of `KEY=...` lines.
//!
//! This module handles:
//! - Building the key to quoted value mapping with a deterministic match order
//! - Streaming a file's lines through the mapping into a staging file
//! - Committing staged content back to the original path
//! - Driving a run over several files with a failure policy

pub mod batch;
pub mod mapping;
pub mod rewriter;

pub use batch::{FailurePolicy, FileOutcome, RunSummary, rewrite_files};
pub use mapping::{Binding, VariableMapping};
pub use rewriter::{RewriteStats, rewrite_file, rewrite_lines};
