//! Diagnostic logging to stderr using the `tracing` ecosystem.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
	if verbose {
		"envreplace=debug,warn"
	} else {
		"warn"
	}
}

/// Install the global stderr subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flag when set.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
