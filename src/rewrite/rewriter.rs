use crate::env::EnvVar;
use crate::error::{EnvReplaceError, Result};
use crate::rewrite::mapping::VariableMapping;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Counters collected while rewriting one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
	/// Lines read from the source (and written to the output).
	pub lines: usize,

	/// Lines replaced with a `KEY="value"` binding.
	pub rewritten: usize,
}

/// Stream `reader` into `writer`, rewriting lines that start with a mapping key.
///
/// Lines are handled as raw bytes, so content that is not UTF-8 passes
/// through untouched. Every output line ends with a single `\n`. `path` is
/// only used for errors and log messages.
pub fn rewrite_lines<R: BufRead, W: Write>(
	reader: R,
	writer: &mut W,
	mapping: &VariableMapping,
	path: &Path,
) -> Result<RewriteStats> {
	let mut stats = RewriteStats::default();

	for line in reader.split(b'\n') {
		let mut line = line.map_err(|source| EnvReplaceError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		if line.last() == Some(&b'\r') {
			line.pop();
		}

		let written = match mapping.find_match(&line) {
			Some(binding) => {
				debug!(
					"updating {} to value {} in file {}",
					binding.key,
					binding.quoted_value,
					path.display()
				);
				stats.rewritten += 1;
				writer.write_all(binding.render().as_bytes())
			}
			None => writer.write_all(&line),
		};

		written
			.and_then(|()| writer.write_all(b"\n"))
			.map_err(|source| EnvReplaceError::Write {
				path: path.to_path_buf(),
				source,
			})?;
		stats.lines += 1;
	}

	Ok(stats)
}

/// Rewrite one file in place using the given variables.
///
/// The mapping is built fresh for this file. Output is staged in an anonymous
/// temporary file, then the original is truncated and the staged content is
/// copied back, so the file keeps its inode and permissions.
pub fn rewrite_file(path: &Path, vars: &[EnvVar]) -> Result<RewriteStats> {
	debug!("processing file: {}", path.display());

	let mut file = OpenOptions::new()
		.read(true)
		.write(true)
		.open(path)
		.map_err(|source| EnvReplaceError::FileOpen {
			path: path.to_path_buf(),
			source,
		})?;

	let mut staging = tempfile::tempfile().map_err(|source| EnvReplaceError::StagingCreate {
		path: path.to_path_buf(),
		source,
	})?;

	let mapping = VariableMapping::from_vars(vars);

	let stats = {
		let reader = BufReader::new(&file);
		let mut writer = BufWriter::new(&staging);
		let stats = rewrite_lines(reader, &mut writer, &mapping, path)?;
		writer.flush().map_err(|source| EnvReplaceError::Write {
			path: path.to_path_buf(),
			source,
		})?;
		stats
	};

	commit(&mut file, &mut staging, path)?;

	debug!(
		"rewrote {} of {} line(s) in {}",
		stats.rewritten,
		stats.lines,
		path.display()
	);
	Ok(stats)
}

/// Replace the content of `file` with the content of `staging`.
fn commit(file: &mut File, staging: &mut File, path: &Path) -> Result<()> {
	file.set_len(0).map_err(|source| EnvReplaceError::Truncate {
		path: path.to_path_buf(),
		source,
	})?;

	let seek_err = |source| EnvReplaceError::Seek {
		path: path.to_path_buf(),
		source,
	};
	file.seek(SeekFrom::Start(0)).map_err(seek_err)?;
	staging.seek(SeekFrom::Start(0)).map_err(seek_err)?;

	let copy_err = |source| EnvReplaceError::Copy {
		path: path.to_path_buf(),
		source,
	};
	std::io::copy(staging, file).map_err(copy_err)?;
	file.flush().map_err(copy_err)?;

	Ok(())
}
