//! Scripted collaborators for exercising the manager and host without a UI.

use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::prompt::{ConfirmRequest, FileFilter, Prompt};
use crate::storage::Storage;

/// In-memory [`Storage`] with per-path failure injection.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	files: Mutex<HashMap<PathBuf, Vec<u8>>>,
	failing_writes: Mutex<HashSet<PathBuf>>,
}

impl MemoryStorage {
	pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
		self.files.lock().unwrap().insert(path.into(), content.as_bytes().to_vec());
		self
	}

	pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
		self.failing_writes.lock().unwrap().insert(path.into());
	}

	pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
		self.files
			.lock()
			.unwrap()
			.get(path.as_ref())
			.map(|bytes| String::from_utf8_lossy(bytes).into_owned())
	}
}

#[async_trait]
impl Storage for MemoryStorage {
	async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
		self.files
			.lock()
			.unwrap()
			.get(path)
			.cloned()
			.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
	}

	async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
		if self.failing_writes.lock().unwrap().contains(path) {
			return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
		}
		self.files.lock().unwrap().insert(path.to_path_buf(), bytes.to_vec());
		Ok(())
	}
}

/// [`Prompt`] that answers from queues and records what it was asked.
///
/// An exhausted queue answers as if the user dismissed the prompt.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
	open_answers: Mutex<VecDeque<Option<PathBuf>>>,
	save_answers: Mutex<VecDeque<Option<PathBuf>>>,
	confirm_answers: Mutex<VecDeque<usize>>,
	pub open_prompts: Mutex<usize>,
	pub save_prompts: Mutex<usize>,
	pub confirmations: Mutex<Vec<ConfirmRequest>>,
	pub errors: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
	pub fn answer_open(&self, answer: Option<&str>) -> &Self {
		self.open_answers.lock().unwrap().push_back(answer.map(PathBuf::from));
		self
	}

	pub fn answer_save(&self, answer: Option<&str>) -> &Self {
		self.save_answers.lock().unwrap().push_back(answer.map(PathBuf::from));
		self
	}

	pub fn answer_confirm(&self, choice: usize) -> &Self {
		self.confirm_answers.lock().unwrap().push_back(choice);
		self
	}

	pub fn save_prompt_count(&self) -> usize {
		*self.save_prompts.lock().unwrap()
	}

	pub fn confirmation_count(&self) -> usize {
		self.confirmations.lock().unwrap().len()
	}

	pub fn reported_errors(&self) -> Vec<String> {
		self.errors.lock().unwrap().clone()
	}
}

#[async_trait]
impl Prompt for ScriptedPrompt {
	async fn choose_file_to_open(&self, _filters: &[FileFilter]) -> Option<PathBuf> {
		*self.open_prompts.lock().unwrap() += 1;
		self.open_answers.lock().unwrap().pop_front().flatten()
	}

	async fn choose_save_destination(&self, _filters: &[FileFilter]) -> Option<PathBuf> {
		*self.save_prompts.lock().unwrap() += 1;
		self.save_answers.lock().unwrap().pop_front().flatten()
	}

	async fn confirm(&self, request: &ConfirmRequest) -> usize {
		self.confirmations.lock().unwrap().push(request.clone());
		self.confirm_answers.lock().unwrap().pop_front().unwrap_or(request.cancel_choice)
	}

	async fn show_error(&self, message: &str) {
		self.errors.lock().unwrap().push(message.to_string());
	}
}
