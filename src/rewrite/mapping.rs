use crate::env::EnvVar;
use std::collections::BTreeMap;

/// A key and its quoted replacement value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
	pub key: String,

	/// The value wrapped in literal double quotes, without escaping.
	pub quoted_value: String,
}

impl Binding {
	/// The `KEY="value"` line this binding writes.
	pub fn render(&self) -> String {
		format!("{}={}", self.key, self.quoted_value)
	}
}

/// Keys and quoted values used to rewrite the lines of one file.
///
/// Bindings are kept in match order: longest key first, equal lengths in
/// lexicographic order. A line is rewritten by the first binding whose key is
/// a prefix of it, so `FOOBAR` wins over `FOO` for `FOOBAR=1`.
#[derive(Debug, Clone, Default)]
pub struct VariableMapping {
	bindings: Vec<Binding>,
}

impl VariableMapping {
	/// Build a mapping from variables. Later duplicates replace earlier ones.
	pub fn from_vars(vars: &[EnvVar]) -> Self {
		let mut by_key: BTreeMap<&str, &str> = BTreeMap::new();
		for var in vars {
			by_key.insert(&var.key, &var.value);
		}

		let mut bindings: Vec<Binding> = by_key
			.into_iter()
			.map(|(key, value)| Binding {
				key: key.to_string(),
				quoted_value: quote(value),
			})
			.collect();

		bindings.sort_by(|a, b| {
			b.key
				.len()
				.cmp(&a.key.len())
				.then_with(|| a.key.cmp(&b.key))
		});

		VariableMapping { bindings }
	}

	/// Find the binding that rewrites `line`, if any.
	pub fn find_match(&self, line: &[u8]) -> Option<&Binding> {
		self.bindings
			.iter()
			.find(|binding| line.starts_with(binding.key.as_bytes()))
	}

	/// Bindings in match order.
	pub fn bindings(&self) -> &[Binding] {
		&self.bindings
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// True when no variable takes part in the rewrite.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}

fn quote(value: &str) -> String {
	format!("\"{}\"", value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_values_are_quoted_verbatim() {
		let mapping = VariableMapping::from_vars(&[
			EnvVar::new("MSG", r#"say "hi""#),
			EnvVar::new("EMPTY", ""),
		]);

		let msg = mapping.find_match(b"MSG=old").unwrap();
		assert_eq!(msg.render(), r#"MSG="say "hi"""#);

		let empty = mapping.find_match(b"EMPTY=x").unwrap();
		assert_eq!(empty.render(), r#"EMPTY="""#);
	}

	#[test]
	fn test_last_duplicate_wins() {
		let mapping = VariableMapping::from_vars(&[
			EnvVar::new("HOST", "first"),
			EnvVar::new("HOST", "second"),
		]);
		assert_eq!(mapping.len(), 1);
		assert_eq!(mapping.bindings()[0].quoted_value, "\"second\"");
	}

	#[test]
	fn test_longest_key_wins() {
		let mapping = VariableMapping::from_vars(&[
			EnvVar::new("FOO", "short"),
			EnvVar::new("FOOBAR", "long"),
		]);

		assert_eq!(mapping.find_match(b"FOOBAR=1").unwrap().key, "FOOBAR");
		assert_eq!(mapping.find_match(b"FOO=1").unwrap().key, "FOO");
	}

	#[test]
	fn test_equal_length_keys_are_ordered_lexicographically() {
		let mapping = VariableMapping::from_vars(&[
			EnvVar::new("BB", "2"),
			EnvVar::new("AA", "1"),
			EnvVar::new("C", "3"),
		]);
		let keys: Vec<_> = mapping.bindings().iter().map(|b| b.key.as_str()).collect();
		assert_eq!(keys, vec!["AA", "BB", "C"]);
	}

	#[test]
	fn test_match_is_left_anchored() {
		let mapping = VariableMapping::from_vars(&[EnvVar::new("HOST", "h")]);
		assert!(mapping.find_match(b"DB_HOST=x").is_none());
		assert!(mapping.find_match(b"# HOST=x").is_none());
		assert!(mapping.find_match(b"HOSTNAME=x").is_some());
	}

	#[test]
	fn test_empty_mapping_matches_nothing() {
		let mapping = VariableMapping::from_vars(&[]);
		assert!(mapping.is_empty());
		assert!(mapping.find_match(b"").is_none());
		assert!(mapping.find_match(b"ANY=1").is_none());
	}
}
