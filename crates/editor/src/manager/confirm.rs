use crate::prompt::ConfirmRequest;

/// The user's answer to "save changes before continuing?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardChoice {
	/// Save first; continue only if the save completes.
	Save,
	/// Continue and lose the unsaved edits.
	Discard,
	/// Abandon the action that asked.
	Cancel,
}

impl DiscardChoice {
	/// Button order presented to the user.
	pub const ALL: [Self; 3] = [Self::Save, Self::Discard, Self::Cancel];

	pub fn label(self) -> &'static str {
		match self {
			Self::Save => "Save",
			Self::Discard => "Don't Save",
			Self::Cancel => "Cancel",
		}
	}

	fn index(self) -> usize {
		Self::ALL.iter().position(|choice| *choice == self).unwrap_or_default()
	}

	/// Maps a dialog button index back to a choice.
	///
	/// # Panics
	///
	/// Panics on an index outside [`Self::ALL`]: the dialog was built from
	/// that list, so any other answer is a logic defect.
	pub fn from_index(index: usize) -> Self {
		match Self::ALL.get(index) {
			Some(choice) => *choice,
			None => panic!("confirmation dialog returned impossible choice {index}"),
		}
	}

	/// Dialog asking whether to save the document called `name`.
	pub fn request(name: &str) -> ConfirmRequest {
		ConfirmRequest {
			title: "Unsaved changes".to_string(),
			message: format!("Do you want to save the changes you made to {name}?"),
			detail: Some("Your changes will be lost if you don't save them.".to_string()),
			choices: Self::ALL.iter().map(|choice| choice.label().to_string()).collect(),
			default_choice: Self::Save.index(),
			cancel_choice: Self::Cancel.index(),
		}
	}
}

/// Whether a destructive action may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
	Proceed,
	Abort,
}

impl Resolution {
	pub fn is_proceed(self) -> bool {
		self == Self::Proceed
	}
}
