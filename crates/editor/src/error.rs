//! Error types for document I/O.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failed read or write against [`Storage`](crate::Storage).
///
/// Cancelled prompts are not errors; they surface as
/// [`SaveOutcome::Cancelled`](crate::SaveOutcome::Cancelled) or
/// [`Resolution::Abort`](crate::Resolution::Abort).
#[derive(Debug, Error)]
pub enum FileError {
	/// Reading the document from disk failed.
	#[error("failed to open {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Writing the document to disk failed.
	#[error("failed to save {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl FileError {
	/// Path the failed operation targeted.
	pub fn path(&self) -> &PathBuf {
		match self {
			Self::Read { path, .. } | Self::Write { path, .. } => path,
		}
	}
}

/// Convenience alias for document I/O results.
pub type Result<T> = std::result::Result<T, FileError>;
