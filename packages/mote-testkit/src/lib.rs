mod error;

pub use error::{Error, Result};

use std::{
	fs::{self, OpenOptions},
	path::{Path, PathBuf},
	time::SystemTime,
};

use tempfile::TempDir;
use time::OffsetDateTime;

/// A throwaway vault directory whose notes carry controlled modification
/// times, so window selection can be exercised deterministically.
pub struct TempVault {
	dir: TempDir,
}
impl TempVault {
	pub fn new() -> Result<Self> {
		let dir = TempDir::new()
			.map_err(|err| Error::Message(format!("Failed to create temp vault: {err}.")))?;

		Ok(Self { dir })
	}

	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	/// Write a note at `relative` and pin its modification time.
	pub fn write_note(
		&self,
		relative: &str,
		content: &str,
		modified: OffsetDateTime,
	) -> Result<PathBuf> {
		self.write_raw(relative, content.as_bytes(), modified)
	}

	/// Write raw bytes (e.g. invalid UTF-8) at `relative` with a pinned
	/// modification time.
	pub fn write_raw(
		&self,
		relative: &str,
		content: &[u8],
		modified: OffsetDateTime,
	) -> Result<PathBuf> {
		let path = self.dir.path().join(relative);

		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}

		fs::write(&path, content)?;
		self.set_modified(&path, modified)?;

		Ok(path)
	}

	fn set_modified(&self, path: &Path, modified: OffsetDateTime) -> Result<()> {
		let file = OpenOptions::new().append(true).open(path)?;

		file.set_modified(SystemTime::from(modified))?;

		Ok(())
	}
}
