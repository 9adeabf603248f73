//! User configuration loaded from `config.toml`.
//!
//! A missing file yields defaults. A file that fails to parse is reported and
//! also yields defaults, so a typo never prevents the editor from starting.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "lucien";
/// File name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Starting directory for open and save dialogs.
	pub documents_dir: Option<PathBuf>,
	/// Whether the preview pane is visible at startup.
	pub show_preview: bool,
	/// Whether source and preview scroll together.
	pub sync_scroll: bool,
	pub window_width: f32,
	pub window_height: f32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			documents_dir: None,
			show_preview: true,
			sync_scroll: true,
			window_width: 1200.0,
			window_height: 800.0,
		}
	}
}

impl Config {
	/// Dialog starting directory: the configured one, else the platform documents dir.
	pub fn dialog_dir(&self) -> Option<PathBuf> {
		self.documents_dir.clone().or_else(dirs::document_dir)
	}

	pub fn parse(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Result of loading the user configuration.
#[derive(Debug, Default)]
pub struct ConfigLoadReport {
	/// Effective config; defaults when nothing usable was found.
	pub config: Config,
	/// Path the config was looked up at, if a config dir exists.
	pub source: Option<PathBuf>,
	/// Read or parse failures keyed by source file path.
	pub errors: Vec<(PathBuf, String)>,
}

/// `$XDG_CONFIG_HOME/lucien` or the platform equivalent.
pub fn user_config_dir() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Loads `config.toml` from the user config directory.
pub fn load_user_config() -> ConfigLoadReport {
	match user_config_dir() {
		Some(dir) => load_from_dir(&dir),
		None => ConfigLoadReport::default(),
	}
}

/// Loads `config.toml` from `config_dir`.
pub fn load_from_dir(config_dir: &Path) -> ConfigLoadReport {
	let path = config_dir.join(CONFIG_FILE_NAME);
	let mut report = ConfigLoadReport {
		source: Some(path.clone()),
		..ConfigLoadReport::default()
	};

	if !path.exists() {
		return report;
	}

	match load_file(&path) {
		Ok(config) => report.config = config,
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "ignoring config file");
			report.errors.push((path, error.to_string()));
		}
	}
	report
}

fn load_file(path: &Path) -> Result<Config, ConfigError> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
		path: path.to_path_buf(),
		source,
	})?;
	Config::parse(&content)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn missing_file_yields_defaults() {
		let dir = tempfile::tempdir().expect("temp dir should be creatable");

		let report = load_from_dir(dir.path());

		assert_eq!(report.config, Config::default());
		assert_eq!(report.source, Some(dir.path().join(CONFIG_FILE_NAME)));
		assert!(report.errors.is_empty());
	}

	#[test]
	fn partial_file_overrides_only_named_fields() {
		let dir = tempfile::tempdir().expect("temp dir should be creatable");
		std::fs::write(dir.path().join(CONFIG_FILE_NAME), "show_preview = false\ndocuments_dir = \"/notes\"\n").expect("file should be writable");

		let report = load_from_dir(dir.path());

		assert_eq!(
			report.config,
			Config {
				show_preview: false,
				documents_dir: Some(PathBuf::from("/notes")),
				..Config::default()
			}
		);
		assert!(report.errors.is_empty());
	}

	#[test]
	fn invalid_file_is_reported_and_defaults_kept() {
		let dir = tempfile::tempdir().expect("temp dir should be creatable");
		let path = dir.path().join(CONFIG_FILE_NAME);
		std::fs::write(&path, "sync_scroll = \"sometimes\"\n").expect("file should be writable");

		let report = load_from_dir(dir.path());

		assert_eq!(report.config, Config::default());
		assert_eq!(report.errors.len(), 1);
		assert_eq!(report.errors[0].0, path);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(matches!(Config::parse("colour = \"red\""), Err(ConfigError::Parse(_))));
	}

	#[test]
	fn configured_documents_dir_wins() {
		let config = Config {
			documents_dir: Some(PathBuf::from("/notes")),
			..Config::default()
		};
		assert_eq!(config.dialog_dir(), Some(PathBuf::from("/notes")));
	}
}
