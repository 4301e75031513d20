//! Environment capture and prefix filtering.
//!
//! This module handles:
//! - Reading the process environment once per run
//! - Dropping entries that cannot be used as substitution keys
//! - Selecting the variables that take part in substitution

use std::ffi::OsString;
use tracing::debug;

/// A single environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
	/// Variable name. Never empty.
	pub key: String,

	/// Variable value. May be empty or contain further `=` characters.
	pub value: String,
}

impl EnvVar {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		EnvVar {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// Read the current process environment.
pub fn read_process_env() -> Vec<EnvVar> {
	let vars = from_os_pairs(std::env::vars_os());
	debug!("read total of {} environment variables", vars.len());
	vars
}

/// Convert name/value pairs as the OS reports them into variables.
///
/// The OS splits each entry on its first `=`, so values keep any further
/// `=` characters. Entries with an empty name or non-Unicode content are
/// skipped.
pub fn from_os_pairs<I>(pairs: I) -> Vec<EnvVar>
where
	I: IntoIterator<Item = (OsString, OsString)>,
{
	let mut vars = Vec::new();

	for (key, value) in pairs {
		match (key.into_string(), value.into_string()) {
			(Ok(key), Ok(value)) if !key.is_empty() => vars.push(EnvVar { key, value }),
			(Ok(key), Ok(_)) => debug!("skipping environment variable with empty name: {key:?}"),
			(key, _) => debug!("skipping non-unicode environment variable: {key:?}"),
		}
	}

	vars
}

/// Keep only the variables whose key starts with at least one prefix.
///
/// An empty prefix list keeps everything. Relative order is preserved and a
/// variable matching several prefixes appears once.
pub fn filter_by_prefix(vars: Vec<EnvVar>, prefixes: &[String]) -> Vec<EnvVar> {
	if prefixes.is_empty() {
		return vars;
	}

	debug!(
		"filtering environment variables by {} prefix(es): {:?}",
		prefixes.len(),
		prefixes
	);

	let filtered: Vec<EnvVar> = vars
		.into_iter()
		.filter(|var| {
			let keep = prefixes
				.iter()
				.any(|prefix| var.key.starts_with(prefix.as_str()));
			if keep {
				debug!("added prefixed environment variable: {}", var.key);
			}
			keep
		})
		.collect();

	debug!("kept {} prefixed environment variables", filtered.len());
	filtered
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Build variables from `KEY=VALUE` strings, splitting on the first `=`.
	fn vars(raw: &[&str]) -> Vec<EnvVar> {
		let pairs = raw.iter().map(|r| {
			let (key, value) = r.split_once('=').unwrap_or((*r, ""));
			(OsString::from(key), OsString::from(value))
		});
		from_os_pairs(pairs)
	}

	fn prefixes(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|p| p.to_string()).collect()
	}

	#[test]
	fn test_value_keeps_later_equals() {
		let parsed = vars(&["DSN=postgres://u:p@h/db?sslmode=require"]);
		assert_eq!(
			parsed,
			vec![EnvVar::new("DSN", "postgres://u:p@h/db?sslmode=require")]
		);
	}

	#[test]
	fn test_empty_value_is_kept() {
		assert_eq!(vars(&["EMPTY="]), vec![EnvVar::new("EMPTY", "")]);
	}

	#[test]
	fn test_empty_name_is_skipped() {
		assert_eq!(vars(&["=C:=C:\\", "A=1"]), vec![EnvVar::new("A", "1")]);
	}

	#[cfg(unix)]
	#[test]
	fn test_non_unicode_entries_are_skipped() {
		use std::os::unix::ffi::OsStringExt;

		let pairs = vec![
			(OsString::from_vec(vec![b'K', 0xff]), OsString::from("v")),
			(OsString::from("KEY"), OsString::from_vec(vec![0xfe])),
			(OsString::from("OK"), OsString::from("yes")),
		];
		assert_eq!(from_os_pairs(pairs), vec![EnvVar::new("OK", "yes")]);
	}

	#[test]
	fn test_filter_without_prefixes_is_identity() {
		let all = vars(&["B=2", "A=1", "C=3"]);
		assert_eq!(filter_by_prefix(all.clone(), &[]), all);
	}

	#[test]
	fn test_filter_keeps_only_prefixed_in_order() {
		let all = vars(&["APP_PORT=8080", "DB_HOST=y", "APP_NAME=demo", "HOME=/root"]);
		let kept = filter_by_prefix(all, &prefixes(&["APP_"]));
		assert_eq!(
			kept,
			vec![EnvVar::new("APP_PORT", "8080"), EnvVar::new("APP_NAME", "demo")]
		);
	}

	#[test]
	fn test_filter_multiple_matching_prefixes_keeps_one_copy() {
		let all = vars(&["APP_PORT=8080", "DB_HOST=y"]);
		let kept = filter_by_prefix(all, &prefixes(&["APP", "APP_", "DB_"]));
		assert_eq!(
			kept,
			vec![EnvVar::new("APP_PORT", "8080"), EnvVar::new("DB_HOST", "y")]
		);
	}

	#[test]
	fn test_filter_empty_environment() {
		assert!(filter_by_prefix(Vec::new(), &prefixes(&["APP_"])).is_empty());
	}

	#[test]
	fn test_filter_is_case_sensitive() {
		let all = vars(&["app_port=1", "APP_PORT=2"]);
		let kept = filter_by_prefix(all, &prefixes(&["APP_"]));
		assert_eq!(kept, vec![EnvVar::new("APP_PORT", "2")]);
	}

	#[test]
	fn test_read_process_env_has_no_empty_keys() {
		assert!(read_process_env().iter().all(|var| !var.key.is_empty()));
	}
}
