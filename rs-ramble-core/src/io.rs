use std::fs;
use std::path::Path;

use crate::error::{RambleError, Result};

/// Reads a whole text file into memory.
///
/// The path is carried into the error so the caller can report which
/// corpus failed to load.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	fs::read_to_string(path).map_err(|source| RambleError::Io { path: path.to_owned(), source })
}

/// Lists the files with a given extension in a directory, sorted by name.
///
/// Returns file names only (no paths).
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> std::io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
