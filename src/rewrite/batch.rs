use crate::env::EnvVar;
use crate::error::{EnvReplaceError, Result};
use crate::rewrite::rewriter::{RewriteStats, rewrite_file};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What to do when a file cannot be rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
	/// Stop at the first failing file. Files already processed stay rewritten.
	#[default]
	Abort,

	/// Attempt every file and report failures in the summary.
	Continue,
}

/// Result of processing one file.
#[derive(Debug)]
pub struct FileOutcome {
	pub path: PathBuf,
	pub result: Result<RewriteStats>,
}

/// Per-file outcomes of one run, in the order the files were given.
#[derive(Debug, Default)]
pub struct RunSummary {
	pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
	pub fn failures(&self) -> impl Iterator<Item = (&Path, &EnvReplaceError)> {
		self.outcomes.iter().filter_map(|outcome| {
			outcome
				.result
				.as_ref()
				.err()
				.map(|err| (outcome.path.as_path(), err))
		})
	}

	pub fn has_failures(&self) -> bool {
		self.failures().next().is_some()
	}

	pub fn succeeded(&self) -> usize {
		self.outcomes.iter().filter(|o| o.result.is_ok()).count()
	}

	/// Total number of lines rewritten across all successful files.
	pub fn lines_rewritten(&self) -> usize {
		self.outcomes
			.iter()
			.filter_map(|o| o.result.as_ref().ok())
			.map(|stats| stats.rewritten)
			.sum()
	}
}

/// Rewrite each file in order.
///
/// With [`FailurePolicy::Abort`] the first error is returned and later files
/// are left untouched. With [`FailurePolicy::Continue`] every file is
/// attempted and errors are recorded in the summary.
pub fn rewrite_files(
	paths: &[PathBuf],
	vars: &[EnvVar],
	policy: FailurePolicy,
) -> Result<RunSummary> {
	if paths.is_empty() {
		return Err(EnvReplaceError::NoFiles);
	}

	debug!("processing {} file(s): {:?}", paths.len(), paths);

	let mut summary = RunSummary::default();

	for path in paths {
		let result = match rewrite_file(path, vars) {
			Err(err) if policy == FailurePolicy::Abort => return Err(err),
			Err(err) => {
				warn!("{}: {} ({})", path.display(), err, err.category());
				Err(err)
			}
			Ok(stats) => Ok(stats),
		};

		summary.outcomes.push(FileOutcome {
			path: path.clone(),
			result,
		});
	}

	Ok(summary)
}
