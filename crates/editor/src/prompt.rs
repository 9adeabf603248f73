//! User-facing prompt seam: file pickers, confirmation, and error reports.

use std::path::PathBuf;

use async_trait::async_trait;

/// A named group of file extensions offered by file pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
	pub name: &'static str,
	pub extensions: &'static [&'static str],
}

/// Filters offered by the open and save dialogs, in display order.
///
/// Everything except the trailing catch-all is also what drag-and-drop
/// accepts.
pub const FILE_FILTERS: &[FileFilter] = &[
	FileFilter {
		name: "Markdown Files",
		extensions: &["md", "mkd", "mdown", "markdown"],
	},
	FileFilter {
		name: "Text Files",
		extensions: &["txt", "text"],
	},
	FileFilter {
		name: "All Files",
		extensions: &["*"],
	},
];

/// A modal multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
	pub title: String,
	pub message: String,
	pub detail: Option<String>,
	/// Button labels, in display order.
	pub choices: Vec<String>,
	/// Index into `choices` focused by default.
	pub default_choice: usize,
	/// Index into `choices` returned when the dialog is dismissed.
	pub cancel_choice: usize,
}

/// Modal interaction with the user.
///
/// Every method suspends only the issuing side. Cancellation is reported as
/// `None`, never as an error.
#[async_trait]
pub trait Prompt: Send + Sync {
	/// Asks for an existing file to open.
	async fn choose_file_to_open(&self, filters: &[FileFilter]) -> Option<PathBuf>;

	/// Asks where a never-saved document should be written.
	async fn choose_save_destination(&self, filters: &[FileFilter]) -> Option<PathBuf>;

	/// Shows `request` and returns the index of the chosen button.
	async fn confirm(&self, request: &ConfirmRequest) -> usize;

	/// Reports a failure to the user.
	async fn show_error(&self, message: &str);
}
