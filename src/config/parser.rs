use crate::config::types::PartialSettings;
use crate::error::{EnvReplaceError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<PartialSettings> {
	let content = std::fs::read_to_string(path).map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			EnvReplaceError::ConfigNotFound {
				path: path.to_path_buf(),
			}
		} else {
			EnvReplaceError::ConfigReadError {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<PartialSettings> {
	toml::from_str(content).map_err(|source| EnvReplaceError::ConfigParseError {
		path: path.to_path_buf(),
		source,
	})
}
