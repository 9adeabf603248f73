use std::path::{Path, PathBuf};

use crate::prompt::FILE_FILTERS;

/// Visual feedback while files hover over the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHint {
	/// A single supported file: highlight as a valid target.
	Accept,
	/// Nothing usable is being dragged: highlight as an error.
	Reject,
	/// Several files: leave the surface unchanged.
	Ignore,
}

/// What to do with a completed drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropVerdict {
	Open(PathBuf),
	TooMany,
	Unsupported,
}

impl DropVerdict {
	/// Message reported to the user for a rejected drop.
	pub fn error_message(&self) -> Option<&'static str> {
		match self {
			Self::Open(_) => None,
			Self::TooMany => Some("Dragging many files is not supported!"),
			Self::Unsupported => Some("File type is not supported!"),
		}
	}
}

/// Whether `path` has a Markdown or plain-text extension.
pub fn is_supported(path: &Path) -> bool {
	let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
		return false;
	};

	FILE_FILTERS
		.iter()
		.flat_map(|filter| filter.extensions.iter())
		.filter(|candidate| **candidate != "*")
		.any(|candidate| candidate.eq_ignore_ascii_case(extension))
}

pub fn drag_hint(paths: &[PathBuf]) -> DragHint {
	match paths {
		[] => DragHint::Reject,
		[path] if is_supported(path) => DragHint::Accept,
		[_] => DragHint::Reject,
		_ => DragHint::Ignore,
	}
}

/// An empty drop is treated as unsupported.
pub fn classify_drop(paths: &[PathBuf]) -> DropVerdict {
	match paths {
		[path] if is_supported(path) => DropVerdict::Open(path.clone()),
		[] | [_] => DropVerdict::Unsupported,
		_ => DropVerdict::TooMany,
	}
}
