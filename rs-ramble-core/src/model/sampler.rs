use rand::Rng;
use tracing::debug;

use super::chain::Chain;
use super::token::{ChainToken, begin_state};
use crate::error::{RambleError, Result};
use crate::tokenize::{TaggedToken, Tokenizer};

/// Sampling parameters.
///
/// # Invariants
/// - `tries`, `max_tokens` and `max_overlap_total` are >= 1
/// - `max_overlap_ratio` is within `0.0..=1.0`
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
	/// Walks attempted by [`Sampler::ramble`] before giving up.
	tries: usize,

	/// Longest sentence, in words, before a walk is abandoned.
	max_tokens: usize,

	/// Fraction of a sentence allowed to repeat the source verbatim.
	max_overlap_ratio: f64,

	/// Absolute cap on the verbatim run, in words.
	max_overlap_total: usize,
}

impl Default for SamplerConfig {
	fn default() -> Self {
		Self { tries: 10, max_tokens: 100, max_overlap_ratio: 0.7, max_overlap_total: 15 }
	}
}

impl SamplerConfig {
	pub fn tries(&self) -> usize {
		self.tries
	}

	pub fn max_tokens(&self) -> usize {
		self.max_tokens
	}

	pub fn max_overlap_ratio(&self) -> f64 {
		self.max_overlap_ratio
	}

	pub fn max_overlap_total(&self) -> usize {
		self.max_overlap_total
	}

	/// # Errors
	/// Returns an error if `tries` is 0.
	pub fn set_tries(&mut self, tries: usize) -> Result<()> {
		if tries == 0 {
			return Err(RambleError::InvalidConfig("tries must be >= 1".to_owned()));
		}
		self.tries = tries;
		Ok(())
	}

	/// # Errors
	/// Returns an error if `max_tokens` is 0.
	pub fn set_max_tokens(&mut self, max_tokens: usize) -> Result<()> {
		if max_tokens == 0 {
			return Err(RambleError::InvalidConfig("max_tokens must be >= 1".to_owned()));
		}
		self.max_tokens = max_tokens;
		Ok(())
	}

	/// # Errors
	/// Returns an error if the value is outside `0.0..=1.0`.
	pub fn set_max_overlap_ratio(&mut self, ratio: f64) -> Result<()> {
		if !(0.0..=1.0).contains(&ratio) {
			return Err(RambleError::InvalidConfig(format!("max_overlap_ratio must be between 0.0 and 1.0, got {ratio}")));
		}
		self.max_overlap_ratio = ratio;
		Ok(())
	}

	/// # Errors
	/// Returns an error if `max_overlap_total` is 0.
	pub fn set_max_overlap_total(&mut self, max_overlap_total: usize) -> Result<()> {
		if max_overlap_total == 0 {
			return Err(RambleError::InvalidConfig("max_overlap_total must be >= 1".to_owned()));
		}
		self.max_overlap_total = max_overlap_total;
		Ok(())
	}
}

/// Why a single walk produced no sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WalkFailure {
	/// The current state has no recorded transition.
	#[error("dead end")]
	DeadEnd,
	/// The walk exceeded `max_tokens` words without reaching the end.
	#[error("too long")]
	TooLong,
	/// The walk reached the end without emitting a word.
	#[error("empty")]
	Empty,
}

/// Random walker over a [`Chain`].
///
/// Borrows the model, so any number of samplers can read the same model.
pub struct Sampler<'a, M, T> {
	model: &'a M,
	tokenizer: &'a T,
	config: &'a SamplerConfig,
}

impl<'a, M: Chain, T: Tokenizer> Sampler<'a, M, T> {
	pub fn new(model: &'a M, tokenizer: &'a T, config: &'a SamplerConfig) -> Self {
		Self { model, tokenizer, config }
	}

	/// Walks the chain once from the begin state.
	///
	/// Each step draws the next token from the current window, then slides
	/// the window by one. Stops on [`ChainToken::End`].
	pub fn walk<R: Rng>(&self, rng: &mut R) -> std::result::Result<Vec<TaggedToken>, WalkFailure> {
		let mut state = begin_state(self.model.state_size());
		let mut words = Vec::new();

		loop {
			let next = self.model.next_token(&state, rng).ok_or(WalkFailure::DeadEnd)?;
			match next {
				ChainToken::End => break,
				ChainToken::Word(token) => words.push(token.clone()),
				ChainToken::Begin => return Err(WalkFailure::DeadEnd),
			}
			if words.len() > self.config.max_tokens {
				return Err(WalkFailure::TooLong);
			}
			state.remove(0);
			state.push(next.clone());
		}

		if words.is_empty() {
			return Err(WalkFailure::Empty);
		}
		Ok(words)
	}

	/// Samples a sentence that does not copy the source text.
	///
	/// Up to `tries` walks are attempted; a walk is kept only if it passes
	/// the overlap test (see [`Sampler::is_novel`]).
	///
	/// # Errors
	/// [`RambleError::NoSentence`] when every attempt fails.
	pub fn ramble<R: Rng>(&self, rng: &mut R) -> Result<String> {
		let source_text = self.model.source_sentences().join(" ");

		for attempt in 1..=self.config.tries {
			match self.walk(rng) {
				Ok(words) if self.is_novel(&words, &source_text) => {
					debug!(attempt, words = words.len(), "sentence accepted");
					return Ok(self.tokenizer.word_join(&words));
				}
				Ok(words) => debug!(attempt, words = words.len(), "sentence overlaps the source"),
				Err(failure) => debug!(attempt, %failure, "walk failed"),
			}
		}

		Err(RambleError::NoSentence { attempts: self.config.tries })
	}

	/// Samples one sentence with a single walk and no overlap test.
	///
	/// # Errors
	/// [`RambleError::NoSentence`] if the walk fails.
	pub fn sample_once<R: Rng>(&self, rng: &mut R) -> Result<String> {
		match self.walk(rng) {
			Ok(words) => Ok(self.tokenizer.word_join(&words)),
			Err(failure) => {
				debug!(%failure, "direct walk failed");
				Err(RambleError::NoSentence { attempts: 1 })
			}
		}
	}

	/// Whether `words` avoids repeating a long run of the source verbatim.
	///
	/// The longest tolerated run is `min(round(ratio * len), max_overlap_total)`
	/// words, halves rounding to even; any longer run found in `source_text` (or the whole sentence,
	/// when it is shorter) rejects the sentence.
	pub fn is_novel(&self, words: &[TaggedToken], source_text: &str) -> bool {
		let overlap_ratio = (self.config.max_overlap_ratio * words.len() as f64).round_ties_even() as usize;
		let overlap_max = overlap_ratio.min(self.config.max_overlap_total);
		let gram_count = words.len().saturating_sub(overlap_max).max(1);

		(0..gram_count).all(|i| {
			let end = (i + overlap_max + 1).min(words.len());
			let gram = self.tokenizer.word_join(&words[i..end]);
			!source_text.contains(&gram)
		})
	}
}
