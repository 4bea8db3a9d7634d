use std::path::Path;

use rand::Rng;
use tracing::{info, warn};

use crate::corpus::{Corpus, CorpusArchive, load_classics, load_primary};
use crate::error::Result;
use crate::model::combined::{CombinedModel, Weights};
use crate::model::sampler::{Sampler, SamplerConfig};
use crate::model::table::TransitionTable;
use crate::tokenize::Tokenizer;

/// High-level generator blending the primary and classical corpora.
///
/// # Responsibilities
/// - Build one transition table per corpus and combine them with `Weights`
/// - Sample sentences from the combined model
/// - Fall back to a single direct walk when rambling runs out of attempts
///
/// The model is read-only once built; `generate` only needs `&self`.
#[derive(Debug)]
pub struct Generator<T> {
	model: CombinedModel,
	tokenizer: T,
	config: SamplerConfig,
}

impl<T: Tokenizer> Generator<T> {
	pub fn new(model: CombinedModel, tokenizer: T, config: SamplerConfig) -> Self {
		Self { model, tokenizer, config }
	}

	/// Builds the generator from two loaded corpora.
	///
	/// # Errors
	/// Invalid `state_size` or weights.
	pub fn from_corpora(
		primary: &Corpus,
		classic: &Corpus,
		weights: Weights,
		state_size: usize,
		tokenizer: T,
		config: SamplerConfig,
	) -> Result<Self> {
		let primary_table = TransitionTable::from_corpus(primary, &tokenizer, state_size)?;
		let classic_table = TransitionTable::from_corpus(classic, &tokenizer, state_size)?;
		let model = CombinedModel::combine(&primary_table, weights.primary, &classic_table, weights.classic)?;
		info!(
			states = model.len(),
			primary_weight = weights.primary,
			classic_weight = weights.classic,
			"combined model ready"
		);
		Ok(Self::new(model, tokenizer, config))
	}

	/// Loads the primary corpus from `path` and the classical plays from
	/// `archive`, then builds the generator.
	///
	/// # Errors
	/// - the primary file cannot be read
	/// - a classical work is missing from the archive
	/// - invalid `state_size` or weights
	pub fn from_sources<P, A>(
		path: P,
		archive: &A,
		weights: Weights,
		state_size: usize,
		tokenizer: T,
		config: SamplerConfig,
	) -> Result<Self>
	where
		P: AsRef<Path>,
		A: CorpusArchive + ?Sized,
	{
		let primary = load_primary(path, &tokenizer)?;
		let classic = load_classics(archive, &tokenizer)?;
		Self::from_corpora(&primary, &classic, weights, state_size, tokenizer, config)
	}

	pub fn model(&self) -> &CombinedModel {
		&self.model
	}

	pub fn config(&self) -> &SamplerConfig {
		&self.config
	}

	/// Generates one sentence.
	///
	/// Tries [`Sampler::ramble`] first. Only if it reports
	/// [`RambleError::NoSentence`](crate::error::RambleError::NoSentence)
	/// is a single [`Sampler::sample_once`] attempted; any other error is
	/// returned as is.
	pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<String> {
		let sampler = Sampler::new(&self.model, &self.tokenizer, &self.config);
		match sampler.ramble(rng) {
			Err(e) if e.is_no_sentence() => {
				warn!(error = %e, "rambling failed, trying a direct sample");
				sampler.sample_once(rng)
			}
			result => result,
		}
	}
}
