//! Messages exchanged between the host and the display surface.
//!
//! The two sides only ever communicate through these types, so they derive
//! serde traits and can cross a process boundary unchanged.
//!
//! Every document the host hands to the display carries a generation number.
//! Edits are reported against the generation the display was showing, and
//! the host drops edits whose document has since been replaced.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::file_state::UiState;

/// Host → display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMessage {
	/// Replace the source pane with freshly loaded content.
	OpenFile { generation: u64, content: String },
	/// Clear the source pane.
	NewFile { generation: u64 },
	/// Show or hide the rendered preview.
	TogglePreview,
	/// Window title and menu enablement changed.
	State(UiState),
	/// Quitting was confirmed; the display should close.
	Close,
}

/// Actions reachable from the application menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuCommand {
	New,
	Open,
	Save,
	SaveAs,
	Quit,
	TogglePreview,
}

impl MenuCommand {
	pub const ALL: [Self; 6] = [Self::New, Self::Open, Self::Save, Self::SaveAs, Self::Quit, Self::TogglePreview];

	pub fn label(self) -> &'static str {
		match self {
			Self::New => "New",
			Self::Open => "Open",
			Self::Save => "Save",
			Self::SaveAs => "Save As…",
			Self::Quit => "Quit",
			Self::TogglePreview => "Toggle Preview",
		}
	}

	/// Platform-neutral accelerator, `Cmd` on macOS and `Ctrl` elsewhere.
	pub fn accelerator(self) -> &'static str {
		match self {
			Self::New => "CmdOrCtrl+N",
			Self::Open => "CmdOrCtrl+O",
			Self::Save => "CmdOrCtrl+S",
			Self::SaveAs => "CmdOrCtrl+Shift+S",
			Self::Quit => "CmdOrCtrl+Q",
			Self::TogglePreview => "CmdOrCtrl+P",
		}
	}
}

/// Display → host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostRequest {
	/// The user edited the source pane showing document `generation`.
	ContentChanged { generation: u64, data: String },
	/// The display surface asked for the document to be saved.
	RequestSave,
	/// A menu item or its shortcut was activated.
	Menu(MenuCommand),
	/// Files were dropped onto the window.
	DroppedFiles(Vec<PathBuf>),
	/// Open a specific path, e.g. from the command line.
	OpenPath(PathBuf),
	/// The window's close button was pressed.
	CloseRequested,
}
