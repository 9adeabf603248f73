//! Host-side owner of the open document.
//!
//! [`Manager`] is the only code that mutates [`FileState`]. Every operation
//! takes `&mut self`, so mutations apply strictly in the order they were
//! issued and a destructive action cannot start until a save it depends on
//! has finished.
//!
//! # Confirmation workflow
//!
//! Opening another file, starting a new document, and quitting all call
//! [`Manager::request_discard`] first:
//!
//! ```text
//! clean ─────────────────────────────────────────▶ Proceed
//! dirty ─▶ ask ─┬─ Discard ──────────────────────▶ Proceed
//!               ├─ Cancel ───────────────────────▶ Abort
//!               └─ Save ─▶ save().await ─┬─ ok ──▶ Proceed
//!                                        └─ err/cancel ▶ Abort
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::APP_NAME;
use crate::drag_drop::{DropVerdict, classify_drop};
use crate::error::{FileError, Result};
use crate::file_state::{FileState, UNTITLED, UiState, normalize_for_save, normalize_on_load};
use crate::prompt::{FILE_FILTERS, Prompt};
use crate::protocol::DisplayMessage;
use crate::storage::Storage;

mod confirm;

pub use self::confirm::{DiscardChoice, Resolution};

/// Result of a save that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
	/// The document was written to this path.
	Saved(PathBuf),
	/// The user dismissed the save-destination picker.
	Cancelled,
}

/// Owns the [`FileState`] and runs every operation that touches it.
pub struct Manager<S, P> {
	state: FileState,
	storage: S,
	prompt: P,
	outbox: Vec<DisplayMessage>,
	generation: u64,
}

impl<S: Storage, P: Prompt> Manager<S, P> {
	/// Starts with an empty, unsaved document.
	pub fn new(storage: S, prompt: P) -> Self {
		Self {
			state: FileState::new(),
			storage,
			prompt,
			outbox: Vec::new(),
			generation: 0,
		}
	}

	pub fn state(&self) -> &FileState {
		&self.state
	}

	pub fn ui_state(&self) -> UiState {
		self.state.ui_state(APP_NAME)
	}

	/// Bumped every time the document is replaced by open or new.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn prompt(&self) -> &P {
		&self.prompt
	}

	pub fn storage(&self) -> &S {
		&self.storage
	}

	/// Takes the messages queued for the display surface, oldest first.
	pub fn drain_messages(&mut self) -> Vec<DisplayMessage> {
		std::mem::take(&mut self.outbox)
	}

	/// Reads `path` and makes it the open document.
	///
	/// Does not consult the confirmation workflow; see [`Manager::open_path`].
	/// On failure the error is reported and the current document is kept.
	pub async fn open(&mut self, path: PathBuf) -> Result<()> {
		let read = self.storage.read(&path).await;
		let bytes = match read {
			Ok(bytes) => bytes,
			Err(source) => return Err(self.report(FileError::Read { path, source }).await),
		};

		let data = normalize_on_load(String::from_utf8_lossy(&bytes).into_owned());
		debug!(path = %path.display(), len = data.len(), "document opened");

		self.state = FileState::loaded(path, data.clone());
		self.generation += 1;
		self.outbox.push(DisplayMessage::OpenFile {
			generation: self.generation,
			content: data,
		});
		self.publish_state();
		Ok(())
	}

	/// Writes the document to its path, asking for one if it has none.
	pub async fn save(&mut self) -> Result<SaveOutcome> {
		let path = match self.state.path() {
			Some(path) => path.to_path_buf(),
			None => match self.prompt.choose_save_destination(FILE_FILTERS).await {
				Some(path) => path,
				None => {
					debug!("save cancelled at destination prompt");
					return Ok(SaveOutcome::Cancelled);
				}
			},
		};

		self.write_to(path).await
	}

	/// Writes the document to a newly chosen path.
	pub async fn save_as(&mut self) -> Result<SaveOutcome> {
		let Some(path) = self.prompt.choose_save_destination(FILE_FILTERS).await else {
			debug!("save-as cancelled at destination prompt");
			return Ok(SaveOutcome::Cancelled);
		};

		self.write_to(path).await
	}

	async fn write_to(&mut self, path: PathBuf) -> Result<SaveOutcome> {
		let bytes = normalize_for_save(self.state.data());

		let written = self.storage.write(&path, bytes.as_bytes()).await;
		if let Err(source) = written {
			return Err(self.report(FileError::Write { path, source }).await);
		}

		debug!(path = %path.display(), len = bytes.len(), "document saved");
		self.state.mark_saved(path.clone());
		self.publish_state();
		Ok(SaveOutcome::Saved(path))
	}

	/// Replaces the document with an empty, unsaved one.
	pub fn new_document(&mut self) {
		debug!("new document");
		self.state = FileState::new();
		self.generation += 1;
		self.outbox.push(DisplayMessage::NewFile { generation: self.generation });
		self.publish_state();
	}

	/// Applies an edit reported by the display surface.
	pub fn content_changed(&mut self, data: String) {
		self.state.apply_edit(data);
		self.publish_state();
	}

	/// Flags the document as edited without changing its text.
	pub fn mark_dirty(&mut self) {
		if self.state.is_dirty() {
			return;
		}
		self.state.mark_dirty();
		self.publish_state();
	}

	/// Decides whether the current document may be thrown away.
	///
	/// A clean document resolves immediately. A dirty one asks the user; a
	/// `Save` answer only resolves to [`Resolution::Proceed`] once the save has
	/// completed successfully.
	pub async fn request_discard(&mut self) -> Resolution {
		if !self.state.is_dirty() {
			return Resolution::Proceed;
		}

		let request = DiscardChoice::request(&self.display_name());
		let choice = DiscardChoice::from_index(self.prompt.confirm(&request).await);
		debug!(?choice, "discard confirmation answered");

		match choice {
			DiscardChoice::Discard => Resolution::Proceed,
			DiscardChoice::Cancel => Resolution::Abort,
			DiscardChoice::Save => match self.save().await {
				Ok(SaveOutcome::Saved(_)) => Resolution::Proceed,
				Ok(SaveOutcome::Cancelled) | Err(_) => Resolution::Abort,
			},
		}
	}

	/// Picks a file, confirms discarding the current one, then opens it.
	pub async fn open_interactive(&mut self) -> Result<Resolution> {
		let Some(path) = self.prompt.choose_file_to_open(FILE_FILTERS).await else {
			debug!("open cancelled at file prompt");
			return Ok(Resolution::Abort);
		};

		self.open_path(path).await
	}

	/// Confirms discarding the current document, then opens `path`.
	pub async fn open_path(&mut self, path: PathBuf) -> Result<Resolution> {
		if self.request_discard().await == Resolution::Abort {
			return Ok(Resolution::Abort);
		}

		self.open(path).await?;
		Ok(Resolution::Proceed)
	}

	/// Confirms discarding the current document, then starts a new one.
	pub async fn new_document_guarded(&mut self) -> Resolution {
		let resolution = self.request_discard().await;
		if resolution.is_proceed() {
			self.new_document();
		}
		resolution
	}

	/// Confirms discarding the current document before the application exits.
	pub async fn quit(&mut self) -> Resolution {
		let resolution = self.request_discard().await;
		info!(?resolution, "quit requested");
		resolution
	}

	/// Handles paths dropped onto the display surface.
	pub async fn drop_files(&mut self, paths: &[PathBuf]) -> Result<Resolution> {
		match classify_drop(paths) {
			DropVerdict::Open(path) => self.open_path(path).await,
			verdict => {
				if let Some(message) = verdict.error_message() {
					self.prompt.show_error(message).await;
				}
				Ok(Resolution::Abort)
			}
		}
	}

	fn display_name(&self) -> String {
		self.state
			.path()
			.and_then(Path::file_name)
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| UNTITLED.to_string())
	}

	fn publish_state(&mut self) {
		self.outbox.push(DisplayMessage::State(self.ui_state()));
	}

	async fn report(&self, error: FileError) -> FileError {
		warn!(path = %error.path().display(), %error, "document I/O failed");
		self.prompt.show_error(&error.to_string()).await;
		error
	}
}
