//! Persistence seam for document content.

use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Byte-level file access used by the [`Manager`](crate::Manager).
///
/// Implementations must complete without blocking the caller's scheduler;
/// errors are reported by the manager, never retried.
#[async_trait]
pub trait Storage: Send + Sync {
	/// Reads the full contents of `path`.
	async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

	/// Replaces the contents of `path` with `bytes`.
	async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// [`Storage`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioStorage;

#[async_trait]
impl Storage for TokioStorage {
	async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
		tokio::fs::read(path).await
	}

	async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
		if let Some(parent) = path.parent()
			&& !parent.as_os_str().is_empty()
		{
			tokio::fs::create_dir_all(parent).await?;
		}
		tokio::fs::write(path, bytes).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn write_then_read_roundtrips_bytes() {
		let dir = tempfile::tempdir().expect("temp dir should be creatable");
		let path = dir.path().join("nested").join("doc.md");

		TokioStorage.write(&path, b"# Title\n").await.expect("write should succeed");
		let bytes = TokioStorage.read(&path).await.expect("read should succeed");

		assert_eq!(bytes, b"# Title\n");
	}

	#[tokio::test]
	async fn read_missing_file_is_not_found() {
		let dir = tempfile::tempdir().expect("temp dir should be creatable");
		let err = TokioStorage.read(&dir.path().join("missing.md")).await.unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}
}
