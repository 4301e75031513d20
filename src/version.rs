//! Build metadata for the `version` command.
//!
//! Branch, commit, build and compiler fields are read from the compile-time
//! environment and fall back to `n/a`.

use std::fmt;

const NOT_AVAILABLE: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
	pub name: &'static str,
	pub version: &'static str,
	pub branch: &'static str,
	pub commit: &'static str,
	pub build: &'static str,
	pub rustc_version: &'static str,
}

impl BuildInfo {
	pub fn current() -> Self {
		BuildInfo {
			name: env!("CARGO_PKG_NAME"),
			version: env!("CARGO_PKG_VERSION"),
			branch: option_env!("ENVREPLACE_BRANCH").unwrap_or(NOT_AVAILABLE),
			commit: option_env!("ENVREPLACE_COMMIT").unwrap_or(NOT_AVAILABLE),
			build: option_env!("ENVREPLACE_BUILD").unwrap_or(NOT_AVAILABLE),
			rustc_version: option_env!("ENVREPLACE_RUSTC_VERSION").unwrap_or(NOT_AVAILABLE),
		}
	}
}

impl fmt::Display for BuildInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", self.name)?;
		writeln!(f, "\tversion: {}", self.version)?;
		writeln!(f, "\tbranch: {}", self.branch)?;
		writeln!(f, "\tcommit: {}", self.commit)?;
		writeln!(f, "\tbuild: {}", self.build)?;
		write!(f, "\trust-version: {}", self.rustc_version)
	}
}
