mod error;

pub use error::{Error, Result};

use std::{
	ffi::OsStr,
	fs, io,
	path::{Path, PathBuf},
};

use time::OffsetDateTime;
use walkdir::WalkDir;

/// A candidate note file: path plus last-modified instant. Content is read
/// separately so callers can filter on metadata first.
#[derive(Clone, Debug)]
pub struct NoteFile {
	pub path: PathBuf,
	pub modified: OffsetDateTime,
}

/// Walk the vault tree and collect note files with the given extension.
///
/// A missing or non-directory root is fatal. Entries that cannot be read are
/// skipped with a warning; each call re-walks the tree.
pub fn scan(root: &Path, extension: &str) -> Result<Vec<NoteFile>> {
	let meta = fs::metadata(root)
		.map_err(|err| Error::VaultUnreadable { path: root.to_path_buf(), source: err })?;

	if !meta.is_dir() {
		return Err(Error::VaultUnreadable {
			path: root.to_path_buf(),
			source: io::Error::new(io::ErrorKind::NotADirectory, "Vault root is not a directory."),
		});
	}

	let mut notes = Vec::new();

	for entry in WalkDir::new(root) {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				tracing::warn!(error = %err, "Skipping unreadable vault entry.");

				continue;
			},
		};

		if !entry.file_type().is_file() {
			continue;
		}
		if entry.path().extension().and_then(OsStr::to_str) != Some(extension) {
			continue;
		}

		let modified = match entry.metadata().map_err(io::Error::from).and_then(|meta| meta.modified())
		{
			Ok(modified) => OffsetDateTime::from(modified),
			Err(err) => {
				tracing::warn!(error = %err, path = %entry.path().display(), "Skipping note without readable metadata.");

				continue;
			},
		};

		notes.push(NoteFile { path: entry.into_path(), modified });
	}

	Ok(notes)
}

/// Read a note as UTF-8. Per-file failures are the caller's local-skip
/// concern, never fatal to a scan.
pub fn read(path: &Path) -> io::Result<String> {
	fs::read_to_string(path)
}
