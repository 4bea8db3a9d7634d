use std::path::Path;

use tracing::info;

use super::Corpus;
use super::archive::CorpusArchive;
use crate::clean::strip_chapter_headings;
use crate::error::Result;
use crate::io::read_file;
use crate::tokenize::Tokenizer;

/// The classical works, in concatenation order.
pub const CLASSIC_WORKS: [&str; 3] = ["shakespeare-hamlet.txt", "shakespeare-macbeth.txt", "shakespeare-caesar.txt"];

/// Reads, cleans and splits the primary corpus file.
///
/// # Errors
/// [`RambleError::Io`](crate::error::RambleError::Io) if the file is missing or unreadable.
pub fn load_primary<P: AsRef<Path>, T: Tokenizer>(path: P, tokenizer: &T) -> Result<Corpus> {
	let raw = read_file(&path)?;
	let corpus = Corpus::from_text(&raw, tokenizer);
	info!(path = %path.as_ref().display(), sentences = corpus.len(), "primary corpus loaded");
	Ok(corpus)
}

/// Assembles the classical corpus from the archive.
///
/// Each work has its chapter headings stripped, is cleaned and split into
/// sentences on its own, then the works are concatenated in
/// [`CLASSIC_WORKS`] order.
///
/// # Errors
/// [`RambleError::MissingWork`](crate::error::RambleError::MissingWork) if any work is unavailable.
pub fn load_classics<A: CorpusArchive + ?Sized, T: Tokenizer>(archive: &A, tokenizer: &T) -> Result<Corpus> {
	let mut corpus = Corpus::default();
	for name in CLASSIC_WORKS {
		let raw = archive.raw(name)?;
		corpus.append(Corpus::from_text(&strip_chapter_headings(&raw), tokenizer));
	}
	info!(sentences = corpus.len(), "classic corpus loaded");
	Ok(corpus)
}
