use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use envreplace::EnvReplaceError;
use envreplace::config::{PartialSettings, Settings, parse_config_file};
use envreplace::env::{filter_by_prefix, read_process_env};
use envreplace::logging::init_logging;
use envreplace::rewrite::rewrite_files;
use envreplace::version::BuildInfo;

#[derive(Parser)]
#[command(name = "envreplace")]
#[command(
	author,
	version,
	about = "A tool that replaces environment variables in files",
	long_about = "Reads environment variables and replaces equally named KEY=... lines in the given files"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// File(s) to replace environment variables in
	#[arg(
		short = 'f',
		long = "file",
		value_name = "FILE",
		env = "ENVREPLACE_FILE",
		value_delimiter = ','
	)]
	files: Vec<PathBuf>,

	/// Prefix(es) to filter environment variables by
	#[arg(
		short = 'p',
		long = "prefix",
		value_name = "PREFIX",
		env = "ENVREPLACE_PREFIX",
		value_delimiter = ','
	)]
	prefixes: Vec<String>,

	/// Verbose output
	#[arg(short, long, env = "ENVREPLACE_VERBOSE")]
	verbose: bool,

	/// Keep processing remaining files when one fails
	#[arg(long, env = "ENVREPLACE_KEEP_GOING")]
	keep_going: bool,

	/// TOML file supplying defaults for files, prefixes and flags
	#[arg(short, long, value_name = "PATH", env = "ENVREPLACE_CONFIG")]
	config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the version information for this application
	Version,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	if let Some(Commands::Version) = cli.command {
		println!("{}", BuildInfo::current());
		return Ok(ExitCode::SUCCESS);
	}

	let settings = load_settings(cli)?;
	init_logging(settings.verbose)?;

	handle_replace(&settings)
}

fn load_settings(cli: Cli) -> Result<Settings> {
	let file_settings = match cli.config {
		Some(ref path) => parse_config_file(path)
			.map_err(with_category)
			.with_context(|| format!("Failed to load configuration from {}", path.display()))?,
		None => PartialSettings::default(),
	};

	let cli_settings = PartialSettings {
		files: cli.files,
		prefixes: cli.prefixes,
		verbose: cli.verbose,
		keep_going: cli.keep_going,
	};

	cli_settings
		.merge(file_settings)
		.resolve()
		.map_err(with_category)
}

fn handle_replace(settings: &Settings) -> Result<ExitCode> {
	debug!("processing environment variables");
	let vars = filter_by_prefix(read_process_env(), &settings.prefixes);
	debug!("using {} environment variables", vars.len());

	let summary = rewrite_files(&settings.files, &vars, settings.failure_policy)
		.map_err(with_category)?;

	debug!(
		"rewrote {} line(s) across {} file(s)",
		summary.lines_rewritten(),
		summary.succeeded()
	);

	if !summary.has_failures() {
		return Ok(ExitCode::SUCCESS);
	}

	let failed: Vec<_> = summary.failures().collect();
	eprintln!(
		"{} of {} file(s) failed:",
		failed.len(),
		summary.outcomes.len()
	);
	for (path, err) in failed {
		eprintln!("  {} ({}): {}", path.display(), err.category(), err);
		if let Some(source) = err.source() {
			eprintln!("    caused by: {}", source);
		}
	}

	Ok(ExitCode::FAILURE)
}

/// Wrap a library error so the report leads with its category.
fn with_category(err: EnvReplaceError) -> anyhow::Error {
	let category = err.category();
	anyhow::Error::new(err).context(category.to_string())
}
