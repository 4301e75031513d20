use std::fmt;
use std::path::PathBuf;

/// Library-level structured errors for envreplace.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum EnvReplaceError {
	#[error("No files provided")]
	NoFiles,

	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to open file: {path}")]
	FileOpen {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to create staging file for: {path}")]
	StagingCreate {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read file: {path}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write staged content for: {path}")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to truncate file: {path}")]
	Truncate {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to seek in file: {path}")]
	Seek {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to copy staged content back into: {path}")]
	Copy {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Coarse error classes reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
	Configuration,
	FileAccess,
	Io,
}

impl fmt::Display for ErrorCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ErrorCategory::Configuration => "configuration error",
			ErrorCategory::FileAccess => "file access error",
			ErrorCategory::Io => "I/O error",
		};
		f.write_str(name)
	}
}

impl EnvReplaceError {
	pub fn category(&self) -> ErrorCategory {
		match self {
			EnvReplaceError::NoFiles
			| EnvReplaceError::ConfigNotFound { .. }
			| EnvReplaceError::ConfigReadError { .. }
			| EnvReplaceError::ConfigParseError { .. } => ErrorCategory::Configuration,
			EnvReplaceError::FileOpen { .. } | EnvReplaceError::StagingCreate { .. } => {
				ErrorCategory::FileAccess
			}
			EnvReplaceError::Read { .. }
			| EnvReplaceError::Write { .. }
			| EnvReplaceError::Truncate { .. }
			| EnvReplaceError::Seek { .. }
			| EnvReplaceError::Copy { .. } => ErrorCategory::Io,
		}
	}
}

/// Result type alias using EnvReplaceError.
pub type Result<T> = std::result::Result<T, EnvReplaceError>;
