//! Corpus acquisition: reading, cleaning and splitting source text.

/// Named-work archives (`name -> raw text`).
pub mod archive;

/// Loaders for the primary transcript and the classical plays.
pub mod loader;

use crate::clean::clean;
use crate::tokenize::Tokenizer;

pub use archive::{CorpusArchive, DirectoryArchive, MemoryArchive};
pub use loader::{CLASSIC_WORKS, load_classics, load_primary};

/// An ordered sequence of cleaned sentences.
///
/// Immutable once built, apart from appending whole corpora in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
	sentences: Vec<String>,
}

impl Corpus {
	/// Cleans raw text and splits it into sentences.
	///
	/// Sentences of one character or less are dropped.
	pub fn from_text<T: Tokenizer>(raw: &str, tokenizer: &T) -> Self {
		let sentences = tokenizer
			.split_sentences(&clean(raw))
			.into_iter()
			.filter(|s| s.chars().count() > 1)
			.collect();
		Self { sentences }
	}

	pub fn from_sentences(sentences: Vec<String>) -> Self {
		Self { sentences }
	}

	/// Appends another corpus after this one, without reordering or deduplication.
	pub fn append(&mut self, other: Corpus) {
		self.sentences.extend(other.sentences);
	}

	pub fn sentences(&self) -> &[String] {
		&self.sentences
	}

	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tokenize::RuleTagger;

	#[test]
	fn cleans_then_splits() {
		let corpus = Corpus::from_text("[Enter] The  cat sat 3 times. The dog -- ran. ", &RuleTagger::new());
		assert_eq!(corpus.sentences(), ["The cat sat times.", "The dog ran."]);
	}

	#[test]
	fn drops_single_character_sentences() {
		let corpus = Corpus::from_text("A. Go on! ?", &RuleTagger::new());
		assert_eq!(corpus.sentences(), ["A. Go on!"]);
		let corpus = Corpus::from_text("!", &RuleTagger::new());
		assert!(corpus.is_empty());
	}

	#[test]
	fn append_keeps_order_and_duplicates() {
		let mut corpus = Corpus::from_sentences(vec!["One.".to_owned(), "Two.".to_owned()]);
		corpus.append(Corpus::from_sentences(vec!["Two.".to_owned()]));
		assert_eq!(corpus.sentences(), ["One.", "Two.", "Two."]);
		assert_eq!(corpus.len(), 3);
	}
}
