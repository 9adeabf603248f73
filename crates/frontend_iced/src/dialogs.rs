//! Native dialogs backing the editor's [`Prompt`] seam.
//!
//! rfd's blocking dialogs run on tokio's blocking pool so the host thread's
//! runtime stays free while a dialog is open.

use std::path::PathBuf;

use async_trait::async_trait;
use lucien_editor::APP_NAME;
use lucien_editor::prompt::{ConfirmRequest, FileFilter, Prompt};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::warn;

pub(crate) struct RfdPrompt {
	start_dir: Option<PathBuf>,
}

impl RfdPrompt {
	pub(crate) fn new(start_dir: Option<PathBuf>) -> Self {
		Self { start_dir }
	}

	fn file_dialog(&self, title: &'static str, filters: &[FileFilter]) -> impl FnOnce() -> FileDialog + Send + 'static {
		let filters = filters.to_vec();
		let start_dir = self.start_dir.clone();
		move || {
			let mut dialog = FileDialog::new().set_title(title);
			for filter in &filters {
				dialog = dialog.add_filter(filter.name, filter.extensions);
			}
			if let Some(dir) = start_dir {
				dialog = dialog.set_directory(dir);
			}
			dialog
		}
	}
}

async fn blocking<T: Send + 'static>(dialog: impl FnOnce() -> T + Send + 'static) -> Option<T> {
	match tokio::task::spawn_blocking(dialog).await {
		Ok(value) => Some(value),
		Err(error) => {
			warn!(%error, "dialog task failed");
			None
		}
	}
}

#[async_trait]
impl Prompt for RfdPrompt {
	async fn choose_file_to_open(&self, filters: &[FileFilter]) -> Option<PathBuf> {
		let build = self.file_dialog("Open", filters);
		blocking(move || build().pick_file()).await.flatten()
	}

	async fn choose_save_destination(&self, filters: &[FileFilter]) -> Option<PathBuf> {
		let build = self.file_dialog("Save As", filters);
		blocking(move || build().set_file_name("Untitled.md").save_file()).await.flatten()
	}

	async fn confirm(&self, request: &ConfirmRequest) -> usize {
		let cancel = request.cancel_choice;
		let request = request.clone();
		blocking(move || show_confirm(&request)).await.unwrap_or(cancel)
	}

	async fn show_error(&self, message: &str) {
		let message = message.to_string();
		blocking(move || {
			MessageDialog::new()
				.set_level(MessageLevel::Error)
				.set_title(APP_NAME)
				.set_description(message)
				.set_buttons(MessageButtons::Ok)
				.show()
		})
		.await;
	}
}

fn show_confirm(request: &ConfirmRequest) -> usize {
	let Some(buttons) = buttons_for(&request.choices) else {
		return request.cancel_choice;
	};

	let description = match &request.detail {
		Some(detail) => format!("{}\n\n{detail}", request.message),
		None => request.message.clone(),
	};

	let result = MessageDialog::new()
		.set_level(MessageLevel::Warning)
		.set_title(request.title.as_str())
		.set_description(description)
		.set_buttons(buttons)
		.show();
	choice_index(request, &result)
}

fn buttons_for(choices: &[String]) -> Option<MessageButtons> {
	match choices {
		[] => None,
		[only] => Some(MessageButtons::OkCustom(only.clone())),
		[first, second] => Some(MessageButtons::OkCancelCustom(first.clone(), second.clone())),
		[first, second, third, ..] => Some(MessageButtons::YesNoCancelCustom(first.clone(), second.clone(), third.clone())),
	}
}

/// Maps a dialog result back to an index into `request.choices`.
///
/// Some backends report custom buttons by position instead of by label.
fn choice_index(request: &ConfirmRequest, result: &MessageDialogResult) -> usize {
	match result {
		MessageDialogResult::Custom(label) => request
			.choices
			.iter()
			.position(|choice| choice == label)
			.unwrap_or(request.cancel_choice),
		MessageDialogResult::Yes | MessageDialogResult::Ok => 0,
		MessageDialogResult::No if request.choices.len() > 2 => 1,
		MessageDialogResult::No | MessageDialogResult::Cancel => request.cancel_choice,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unsaved() -> ConfirmRequest {
		ConfirmRequest {
			title: "Unsaved changes".into(),
			message: "Save changes to notes.md?".into(),
			detail: None,
			choices: vec!["Save".into(), "Don't Save".into(), "Cancel".into()],
			default_choice: 0,
			cancel_choice: 2,
		}
	}

	#[test]
	fn custom_labels_map_to_their_position() {
		let request = unsaved();
		assert_eq!(choice_index(&request, &MessageDialogResult::Custom("Don't Save".into())), 1);
		assert_eq!(choice_index(&request, &MessageDialogResult::Custom("Save".into())), 0);
	}

	#[test]
	fn unknown_or_dismissed_results_cancel() {
		let request = unsaved();
		assert_eq!(choice_index(&request, &MessageDialogResult::Custom("Maybe".into())), 2);
		assert_eq!(choice_index(&request, &MessageDialogResult::Cancel), 2);
	}

	#[test]
	fn positional_results_map_to_indices() {
		let request = unsaved();
		assert_eq!(choice_index(&request, &MessageDialogResult::Yes), 0);
		assert_eq!(choice_index(&request, &MessageDialogResult::No), 1);
	}

	#[test]
	fn button_layout_follows_choice_count() {
		assert!(buttons_for(&[]).is_none());
		assert!(matches!(buttons_for(&["Ok".into()]), Some(MessageButtons::OkCustom(_))));
		assert!(matches!(
			buttons_for(&unsaved().choices),
			Some(MessageButtons::YesNoCancelCustom(save, discard, cancel)) if save == "Save" && discard == "Don't Save" && cancel == "Cancel"
		));
	}
}
