//! iced display surface for Lucien.
//!
//! The window owns only presentation state. Every document operation is sent
//! to a [`lucien_editor::Host`] running on its own thread, and the window
//! applies whatever [`lucien_editor::DisplayMessage`]s come back on the next
//! tick.
#![cfg_attr(test, allow(unused_crate_dependencies))]

use std::path::PathBuf;

use lucien_editor::config::{self, Config};
use tracing::warn;

pub mod cli;
pub mod logging;

#[cfg(feature = "iced-wgpu")]
mod app;
#[cfg(feature = "iced-wgpu")]
mod dialogs;
#[cfg(feature = "iced-wgpu")]
mod platform;

pub use cli::Cli;

/// Everything the window needs at startup.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
	/// Document opened before the first request is served.
	pub path: Option<PathBuf>,
	pub config: Config,
}

impl StartupOptions {
	/// Combines command-line arguments with the user config file.
	pub fn from_cli(cli: &Cli) -> Self {
		let report = config::load_user_config();
		for (path, error) in &report.errors {
			warn!(path = %path.display(), %error, "config file ignored");
		}

		Self {
			path: cli.file.clone(),
			config: report.config,
		}
	}
}

/// Sets up logging, loads configuration, and runs the window until it closes.
pub fn launch(cli: Cli) -> anyhow::Result<()> {
	logging::setup_tracing(cli.verbose);
	run(StartupOptions::from_cli(&cli))
}

#[cfg(feature = "iced-wgpu")]
pub use self::app::run;

#[cfg(not(feature = "iced-wgpu"))]
pub fn run(_options: StartupOptions) -> anyhow::Result<()> {
	anyhow::bail!("lucien was built without the `iced-wgpu` feature")
}
