use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lucien")]
#[command(about = "A Markdown editor with live preview")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Markdown file to open (starts with an empty document if omitted)
	pub file: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_file_and_verbose_flag() {
		let cli = Cli::try_parse_from(["lucien", "notes.md", "-v"]).expect("arguments should parse");
		assert_eq!(cli.file, Some(PathBuf::from("notes.md")));
		assert!(cli.verbose);
	}

	#[test]
	fn file_is_optional() {
		let cli = Cli::try_parse_from(["lucien"]).expect("arguments should parse");
		assert!(cli.file.is_none());
		assert!(!cli.verbose);
	}

	#[test]
	fn rejects_second_file() {
		assert!(Cli::try_parse_from(["lucien", "a.md", "b.md"]).is_err());
	}
}
