//! The single open document and its derived UI projection.
//!
//! A [`FileState`] is owned by exactly one [`Manager`](crate::Manager) for the
//! whole session. Its fields are readable everywhere, but every mutation is
//! crate-private so that the dirty flag only changes through the manager's
//! operations:
//!
//! - cleared when an open or save completes successfully
//! - set when the display surface reports an edit

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};


/// Marker prefixed to the window title while the document has unsaved edits.
pub const DIRTY_MARKER: &str = "● ";

/// Name shown for a document that has never been saved.
pub const UNTITLED: &str = "Untitled";

/// What document is currently open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileState {
	path: Option<PathBuf>,
	data: String,
	is_dirty: bool,
}

impl FileState {
	/// Empty, clean, never-saved document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Clean document freshly read from `path`.
	pub fn loaded(path: PathBuf, data: String) -> Self {
		Self {
			path: Some(path),
			data,
			is_dirty: false,
		}
	}

	/// Location on disk, `None` for an unsaved new document.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Full in-memory text.
	pub fn data(&self) -> &str {
		&self.data
	}

	/// Whether the in-memory text differs from what is persisted.
	pub fn is_dirty(&self) -> bool {
		self.is_dirty
	}

	/// Whether there is any document worth exporting.
	pub fn has_content(&self) -> bool {
		self.path.is_some() || !self.data.is_empty()
	}

	/// Records an edit reported by the display surface.
	pub(crate) fn apply_edit(&mut self, data: String) {
		self.data = data;
		self.is_dirty = true;
	}

	pub(crate) fn mark_dirty(&mut self) {
		self.is_dirty = true;
	}

	/// Records a completed write of the current text to `path`.
	pub(crate) fn mark_saved(&mut self, path: PathBuf) {
		self.path = Some(path);
		self.is_dirty = false;
	}

	/// Title shown by the window chrome.
	pub fn title(&self, app_name: &str) -> String {
		let name = match &self.path {
			Some(path) => path
				.file_name()
				.map(|name| name.to_string_lossy().into_owned())
				.unwrap_or_else(|| path.display().to_string()),
			None if self.data.is_empty() && !self.is_dirty => return app_name.to_string(),
			None => UNTITLED.to_string(),
		};

		let marker = if self.is_dirty { DIRTY_MARKER } else { "" };
		format!("{marker}{name} - {app_name}")
	}

	/// Projects the state consumed by window and menu chrome.
	pub fn ui_state(&self, app_name: &str) -> UiState {
		UiState {
			title: self.title(app_name),
			save_enabled: self.is_dirty,
			export_enabled: self.has_content(),
			trash_enabled: self.path.is_some(),
		}
	}
}

/// Derived chrome state, recomputed from [`FileState`] on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
	pub title: String,
	pub save_enabled: bool,
	pub export_enabled: bool,
	pub trash_enabled: bool,
}

/// Text as written to disk, with a trailing newline appended when missing.
pub fn normalize_for_save(data: &str) -> String {
	let mut out = String::with_capacity(data.len() + 1);
	out.push_str(data);
	if !out.ends_with('\n') {
		out.push('\n');
	}
	out
}

/// Text as shown in the editor: one trailing line ending removed.
pub fn normalize_on_load(mut data: String) -> String {
	if data.ends_with('\n') {
		data.pop();
		if data.ends_with('\r') {
			data.pop();
		}
	}
	data
}
