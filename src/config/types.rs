use crate::error::{EnvReplaceError, Result};
use crate::rewrite::FailurePolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// Settings that may come from the command line, the environment, or a
/// config file. Every field is optional so sources can be layered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialSettings {
	/// Files to rewrite, in processing order.
	#[serde(default)]
	pub files: Vec<PathBuf>,

	/// Only environment variables starting with one of these take part.
	#[serde(default)]
	pub prefixes: Vec<String>,

	/// Log every decision to stderr.
	#[serde(default)]
	pub verbose: bool,

	/// Keep processing remaining files after a failure.
	#[serde(default)]
	pub keep_going: bool,
}

impl PartialSettings {
	/// Layer `self` over `fallback`.
	///
	/// Non-empty lists in `self` replace the fallback's lists. Flags are
	/// enabled if either source enables them.
	pub fn merge(self, fallback: PartialSettings) -> PartialSettings {
		PartialSettings {
			files: if self.files.is_empty() {
				fallback.files
			} else {
				self.files
			},
			prefixes: if self.prefixes.is_empty() {
				fallback.prefixes
			} else {
				self.prefixes
			},
			verbose: self.verbose || fallback.verbose,
			keep_going: self.keep_going || fallback.keep_going,
		}
	}

	/// Validate and produce the final settings.
	pub fn resolve(self) -> Result<Settings> {
		if self.files.is_empty() {
			return Err(EnvReplaceError::NoFiles);
		}

		Ok(Settings {
			files: self.files,
			prefixes: self.prefixes,
			verbose: self.verbose,
			failure_policy: if self.keep_going {
				FailurePolicy::Continue
			} else {
				FailurePolicy::Abort
			},
		})
	}
}

/// Validated settings for one run. Built once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
	/// Never empty.
	pub files: Vec<PathBuf>,
	pub prefixes: Vec<String>,
	pub verbose: bool,
	pub failure_policy: FailurePolicy,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn partial(files: &[&str], prefixes: &[&str]) -> PartialSettings {
		PartialSettings {
			files: files.iter().map(PathBuf::from).collect(),
			prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
			..Default::default()
		}
	}

	#[test]
	fn test_resolve_requires_files() {
		let result = PartialSettings::default().resolve();
		assert!(matches!(result, Err(EnvReplaceError::NoFiles)));
	}

	#[test]
	fn test_resolve_defaults_to_abort() {
		let settings = partial(&["a.env"], &[]).resolve().unwrap();
		assert_eq!(settings.failure_policy, FailurePolicy::Abort);
		assert!(!settings.verbose);
	}

	#[test]
	fn test_keep_going_selects_continue() {
		let settings = PartialSettings {
			keep_going: true,
			..partial(&["a.env"], &[])
		}
		.resolve()
		.unwrap();
		assert_eq!(settings.failure_policy, FailurePolicy::Continue);
	}

	#[test]
	fn test_merge_prefers_non_empty_lists() {
		let cli = partial(&["cli.env"], &[]);
		let file = partial(&["file.env"], &["APP_"]);

		let merged = cli.merge(file);

		assert_eq!(merged.files, vec![PathBuf::from("cli.env")]);
		assert_eq!(merged.prefixes, vec!["APP_".to_string()]);
	}

	#[test]
	fn test_merge_ors_flags() {
		let cli = PartialSettings::default();
		let file = PartialSettings {
			verbose: true,
			..Default::default()
		};

		let merged = cli.merge(file);
		assert!(merged.verbose);
		assert!(!merged.keep_going);
	}
}
