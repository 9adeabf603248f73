//! Tracing setup for the binary.
//!
//! Logs go to stderr unless `LUCIEN_LOG_DIR` names a directory, in which case
//! each process appends to its own `lucien.<pid>.log` there. `RUST_LOG`
//! overrides the default filter either way.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

/// Environment variable naming the log directory.
pub const LOG_DIR_ENV: &str = "LUCIEN_LOG_DIR";

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
	if verbose {
		"lucien_editor=trace,lucien_frontend_iced=trace,debug"
	} else {
		"lucien_editor=debug,lucien_frontend_iced=debug,warn"
	}
}

fn env_filter(verbose: bool) -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)))
}

pub fn setup_tracing(verbose: bool) {
	if let Some(log_dir) = std::env::var(LOG_DIR_ENV).ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("lucien.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_span_events(FmtSpan::CLOSE)
				.with_target(true);

			tracing_subscriber::registry().with(env_filter(verbose)).with(file_layer).init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::registry()
		.with(env_filter(verbose))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_filters_parse() {
		for verbose in [false, true] {
			assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
		}
	}

	#[test]
	fn verbose_raises_crate_level() {
		assert!(default_filter(true).contains("lucien_editor=trace"));
		assert!(default_filter(false).contains("lucien_editor=debug"));
	}
}
