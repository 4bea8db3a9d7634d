use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{RambleError, Result};
use crate::io::list_files;

/// Source of named literary works.
///
/// The caller owns the archive and decides where its texts come from; the
/// pipeline only asks for works by name.
pub trait CorpusArchive {
	/// Returns the raw text of a work.
	///
	/// # Errors
	/// [`RambleError::MissingWork`] if the archive does not hold `name`.
	fn raw(&self, name: &str) -> Result<String>;
}

/// Archive backed by a directory of plain text files, one file per work,
/// the file name being the work name (`shakespeare-hamlet.txt`).
///
/// Each file is read at most once; later requests are served from memory.
#[derive(Debug)]
pub struct DirectoryArchive {
	root: PathBuf,
	cache: RefCell<HashMap<String, String>>,
}

impl DirectoryArchive {
	pub fn new<P: AsRef<Path>>(root: P) -> Self {
		Self { root: root.as_ref().to_owned(), cache: RefCell::new(HashMap::new()) }
	}

	/// Names of the works present in the directory.
	pub fn available(&self) -> io::Result<Vec<String>> {
		list_files(&self.root, "txt")
	}
}

impl CorpusArchive for DirectoryArchive {
	fn raw(&self, name: &str) -> Result<String> {
		if let Some(text) = self.cache.borrow().get(name) {
			return Ok(text.clone());
		}

		let path = self.root.join(name);
		let text = fs::read_to_string(&path).map_err(|source| {
			match self.available() {
				Ok(works) => warn!(work = name, available = ?works, "work missing from archive"),
				Err(_) => warn!(work = name, root = %self.root.display(), "archive directory unreadable"),
			}
			RambleError::MissingWork { name: name.to_owned(), source }
		})?;
		debug!(work = name, bytes = text.len(), "work loaded");

		self.cache.borrow_mut().insert(name.to_owned(), text.clone());
		Ok(text)
	}
}

/// In-memory archive, for embedding texts directly.
#[derive(Clone, Debug, Default)]
pub struct MemoryArchive {
	works: HashMap<String, String>,
}

impl MemoryArchive {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
		self.works.insert(name.into(), text.into());
	}
}

impl CorpusArchive for MemoryArchive {
	fn raw(&self, name: &str) -> Result<String> {
		self.works.get(name).cloned().ok_or_else(|| RambleError::MissingWork {
			name: name.to_owned(),
			source: io::Error::new(io::ErrorKind::NotFound, "not in archive"),
		})
	}
}
