use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

use super::chain::Chain;
use super::state::State;
use super::token::{ChainToken, StateKey, begin_state};
use crate::corpus::Corpus;
use crate::error::{RambleError, Result};
use crate::tokenize::{TaggedToken, Tokenizer, is_trainable};

/// Default number of tokens in a chain state.
pub const DEFAULT_STATE_SIZE: usize = 3;

/// Transition counts learned from one corpus.
///
/// Maps each window of `state_size` tokens to the tokens observed right
/// after it. Every sentence contributes one transition out of the begin
/// state and one transition into [`ChainToken::End`].
///
/// # Invariants
/// - `state_size` is always >= 1
/// - Every key was observed in the corpus and has `state_size` tokens
/// - All counts are >= 1
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionTable {
	state_size: usize,
	states: HashMap<StateKey, State<u64>>,
	sentences: Vec<String>,
}

impl TransitionTable {
	/// Creates an empty table.
	///
	/// # Errors
	/// Returns an error if `state_size` is 0.
	pub fn new(state_size: usize) -> Result<Self> {
		if state_size == 0 {
			return Err(RambleError::InvalidStateSize(state_size));
		}
		Ok(Self { state_size, states: HashMap::new(), sentences: Vec::new() })
	}

	/// Builds a table from already tagged sentences.
	///
	/// Source sentences are recorded as their surfaces joined by spaces.
	pub fn build(sentences: &[Vec<TaggedToken>], state_size: usize) -> Result<Self> {
		let mut table = Self::new(state_size)?;
		for words in sentences {
			let rejoined = words.iter().map(|t| t.surface.as_str()).collect::<Vec<_>>().join(" ");
			table.add_sentence(words, rejoined);
		}
		Ok(table)
	}

	/// Tags and splits `text`, then builds a table from the trainable sentences.
	pub fn from_text<T: Tokenizer>(text: &str, tokenizer: &T, state_size: usize) -> Result<Self> {
		let mut table = Self::new(state_size)?;
		for words in tokenizer.tag_and_split(text) {
			let rejoined = tokenizer.word_join(&words);
			if is_trainable(&rejoined) {
				table.add_sentence(&words, rejoined);
			}
		}
		Ok(table)
	}

	/// Builds a table from a cleaned corpus.
	///
	/// Sentences with stray quotes or brackets are skipped.
	pub fn from_corpus<T: Tokenizer>(corpus: &Corpus, tokenizer: &T, state_size: usize) -> Result<Self> {
		let mut table = Self::new(state_size)?;
		let mut skipped = 0usize;
		for sentence in corpus.sentences() {
			if !is_trainable(sentence) {
				skipped += 1;
				continue;
			}
			let words = tokenizer.word_split(sentence);
			let rejoined = tokenizer.word_join(&words);
			table.add_sentence(&words, rejoined);
		}
		debug!(
			states = table.len(),
			sentences = table.sentences.len(),
			skipped,
			state_size,
			"transition table built"
		);
		Ok(table)
	}

	/// Adds one sentence to the table.
	///
	/// The sentence is framed as `[Begin; state_size] ++ words ++ [End]` and
	/// every window of `state_size` tokens counts one transition toward the
	/// token that follows it. Empty sentences are ignored.
	pub fn add_sentence(&mut self, words: &[TaggedToken], rejoined: String) {
		if words.is_empty() {
			return;
		}

		let mut items = begin_state(self.state_size);
		items.extend(words.iter().cloned().map(ChainToken::Word));
		items.push(ChainToken::End);

		for window in items.windows(self.state_size + 1) {
			let (key, next) = window.split_at(self.state_size);
			self.states.entry(key.to_vec()).or_default().add_transition(next[0].clone());
		}

		self.sentences.push(rejoined);
	}

	/// Returns the transitions recorded for a state.
	pub fn state(&self, key: &[ChainToken]) -> Option<&State<u64>> {
		self.states.get(key)
	}

	pub fn states(&self) -> impl Iterator<Item = (&StateKey, &State<u64>)> {
		self.states.iter()
	}

	/// Number of distinct states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}

impl Chain for TransitionTable {
	fn state_size(&self) -> usize {
		self.state_size
	}

	fn next_token<R: Rng>(&self, state: &[ChainToken], rng: &mut R) -> Option<&ChainToken> {
		self.states.get(state)?.predict(rng)
	}

	fn distribution(&self, state: &[ChainToken]) -> Option<Vec<(ChainToken, f64)>> {
		self.states.get(state).map(State::distribution)
	}

	fn source_sentences(&self) -> &[String] {
		&self.sentences
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tokenize::RuleTagger;

	fn words(sentence: &str) -> Vec<TaggedToken> {
		sentence.split_whitespace().map(|w| TaggedToken::new(w, "X")).collect()
	}

	fn word(surface: &str) -> ChainToken {
		ChainToken::Word(TaggedToken::new(surface, "X"))
	}

	#[test]
	fn zero_state_size_is_rejected() {
		assert!(matches!(TransitionTable::new(0), Err(RambleError::InvalidStateSize(0))));
	}

	#[test]
	fn records_begin_and_end_transitions() {
		let table = TransitionTable::build(&[words("a b")], 2).unwrap();

		let counts = |key: &[ChainToken]| -> Vec<(ChainToken, u64)> {
			table.state(key).unwrap().transitions().map(|(t, c)| (t.clone(), c)).collect()
		};
		assert_eq!(table.len(), 3);
		assert_eq!(counts(&[ChainToken::Begin, ChainToken::Begin]), vec![(word("a"), 1)]);
		assert_eq!(counts(&[ChainToken::Begin, word("a")]), vec![(word("b"), 1)]);
		assert_eq!(counts(&[word("a"), word("b")]), vec![(ChainToken::End, 1)]);
	}

	#[test]
	fn counts_repeated_transitions() {
		let table = TransitionTable::build(&[words("a b"), words("a c"), words("a b")], 1).unwrap();
		let after_a: Vec<_> = table.state(&[word("a")]).unwrap().transitions().map(|(t, c)| (t.clone(), c)).collect();
		assert_eq!(after_a, vec![(word("b"), 2), (word("c"), 1)]);
		assert_eq!(table.source_sentences(), ["a b", "a c", "a b"]);
	}

	#[test]
	fn empty_sentences_are_ignored() {
		let table = TransitionTable::build(&[Vec::new()], 3).unwrap();
		assert!(table.is_empty());
		assert!(table.source_sentences().is_empty());
	}

	#[test]
	fn construction_is_deterministic() {
		let text = "The cat sat on the mat. The dog ran to the cat. A bird sang.";
		let first = TransitionTable::from_text(text, &RuleTagger::new(), 2).unwrap();
		let second = TransitionTable::from_text(text, &RuleTagger::new(), 2).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn tags_are_part_of_the_state() {
		let sentences = vec![
			vec![TaggedToken::new("run", "VERB"), TaggedToken::new("fast", "ADV")],
			vec![TaggedToken::new("run", "NOUN"), TaggedToken::new("ends", "VERB")],
		];
		let table = TransitionTable::build(&sentences, 1).unwrap();
		let verb = ChainToken::Word(TaggedToken::new("run", "VERB"));
		let noun = ChainToken::Word(TaggedToken::new("run", "NOUN"));
		assert_eq!(table.state(&[verb]).unwrap().len(), 1);
		assert_eq!(table.state(&[noun]).unwrap().len(), 1);
	}

	#[test]
	fn untrainable_sentences_are_skipped() {
		let table = TransitionTable::from_text("He said \"go\" now. The dog ran.", &RuleTagger::new(), 1).unwrap();
		assert_eq!(table.source_sentences(), ["The dog ran ."]);
	}
}
