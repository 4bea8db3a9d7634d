use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

use super::chain::Chain;
use super::state::State;
use super::table::TransitionTable;
use super::token::{ChainToken, StateKey};
use crate::error::{RambleError, Result};

/// Relative influence of the two corpora.
///
/// A weight is the number of pseudo-observations each real observation of
/// that corpus counts for. Both default to 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
	pub primary: f64,
	pub classic: f64,
}

impl Default for Weights {
	fn default() -> Self {
		Self { primary: 1.0, classic: 1.0 }
	}
}

impl Weights {
	pub fn new(primary: f64, classic: f64) -> Result<Self> {
		validate_weight(primary)?;
		validate_weight(classic)?;
		Ok(Self { primary, classic })
	}
}

fn validate_weight(weight: f64) -> Result<()> {
	if !weight.is_finite() || weight < 0.0 {
		return Err(RambleError::InvalidWeight(weight));
	}
	Ok(())
}

/// Weighted union of transition tables.
///
/// Counts are real-valued: each source count is multiplied by its table's
/// weight and summed per state and next token.
///
/// # Invariants
/// - Every stored weight is strictly positive
/// - A source added with weight 0 contributes no state, transition or
///   source sentence
#[derive(Clone, Debug, PartialEq)]
pub struct CombinedModel {
	state_size: usize,
	states: HashMap<StateKey, State<f64>>,
	sentences: Vec<String>,
}

impl CombinedModel {
	/// Creates an empty model that can absorb tables of `state_size`.
	pub fn empty(state_size: usize) -> Result<Self> {
		if state_size == 0 {
			return Err(RambleError::InvalidStateSize(state_size));
		}
		Ok(Self { state_size, states: HashMap::new(), sentences: Vec::new() })
	}

	/// Combines two tables with their respective weights.
	///
	/// # Errors
	/// - a weight is negative, infinite or NaN
	/// - a weight is so large the scaled counts overflow
	/// - the tables have different state sizes
	pub fn combine(a: &TransitionTable, weight_a: f64, b: &TransitionTable, weight_b: f64) -> Result<Self> {
		let mut model = Self::empty(a.state_size())?;
		model.absorb(a, weight_a)?;
		model.absorb(b, weight_b)?;
		debug!(states = model.len(), weight_a, weight_b, "tables combined");
		Ok(model)
	}

	/// Adds a table's counts multiplied by `weight`.
	///
	/// States already present are merged additively; new ones are inserted.
	/// A zero weight is accepted and leaves the model unchanged.
	///
	/// # Errors
	/// - the weight is negative, infinite or NaN
	/// - a scaled state no longer sums to a finite weight
	/// - the table has a different state size
	pub fn absorb(&mut self, table: &TransitionTable, weight: f64) -> Result<()> {
		validate_weight(weight)?;
		if table.state_size() != self.state_size {
			return Err(RambleError::StateSizeMismatch { left: self.state_size, right: table.state_size() });
		}
		if weight == 0.0 {
			return Ok(());
		}

		for (key, state) in table.states() {
			let merged = self.states.entry(key.clone()).or_default();
			merged.absorb(state, weight);
			if !merged.is_finite() {
				return Err(RambleError::InvalidWeight(weight));
			}
		}
		self.sentences.extend(table.source_sentences().iter().cloned());
		Ok(())
	}

	pub fn state(&self, key: &[ChainToken]) -> Option<&State<f64>> {
		self.states.get(key)
	}

	/// Number of distinct states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}

impl From<&TransitionTable> for CombinedModel {
	/// Wraps a single table with weight 1.
	fn from(table: &TransitionTable) -> Self {
		let states = table
			.states()
			.map(|(key, state)| {
				let mut weighted = State::<f64>::default();
				weighted.absorb(state, 1.0);
				(key.clone(), weighted)
			})
			.collect();
		Self { state_size: table.state_size(), states, sentences: table.source_sentences().to_vec() }
	}
}

impl Chain for CombinedModel {
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
	use crate::tokenize::TaggedToken;

	fn words(sentence: &str) -> Vec<TaggedToken> {
		sentence.split_whitespace().map(|w| TaggedToken::new(w, "X")).collect()
	}

	fn word(surface: &str) -> ChainToken {
		ChainToken::Word(TaggedToken::new(surface, "X"))
	}

	fn tables() -> (TransitionTable, TransitionTable) {
		let a = TransitionTable::build(&[words("a b"), words("a c"), words("a b")], 1).unwrap();
		let b = TransitionTable::build(&[words("a d"), words("x y")], 1).unwrap();
		(a, b)
	}

	fn weights_after_a(model: &CombinedModel) -> Vec<(ChainToken, f64)> {
		model.state(&[word("a")]).unwrap().transitions().map(|(t, w)| (t.clone(), w)).collect()
	}

	#[test]
	fn scales_and_sums_shared_states() {
		let (a, b) = tables();
		let model = CombinedModel::combine(&a, 1.0, &b, 3.0).unwrap();
		assert_eq!(weights_after_a(&model), vec![(word("b"), 2.0), (word("c"), 1.0), (word("d"), 3.0)]);
	}

	#[test]
	fn states_from_one_source_keep_their_own_scale() {
		let (a, b) = tables();
		let model = CombinedModel::combine(&a, 1.0, &b, 0.5).unwrap();
		let after_x: Vec<_> = model.state(&[word("x")]).unwrap().transitions().map(|(t, w)| (t.clone(), w)).collect();
		assert_eq!(after_x, vec![(word("y"), 0.5)]);
	}

	#[test]
	fn zero_weight_excludes_a_source() {
		let (a, b) = tables();
		let model = CombinedModel::combine(&a, 1.0, &b, 0.0).unwrap();

		assert!(model.state(&[word("x")]).is_none());
		assert_eq!(model.len(), a.len());
		for (key, _) in a.states() {
			assert_eq!(model.distribution(key), a.distribution(key));
		}
		assert_eq!(model.source_sentences(), a.source_sentences());
	}

	#[test]
	fn both_weights_zero_is_empty() {
		let (a, b) = tables();
		let model = CombinedModel::combine(&a, 0.0, &b, 0.0).unwrap();
		assert!(model.is_empty());
		assert!(model.source_sentences().is_empty());
	}

	#[test]
	fn uniform_scaling_keeps_distribution() {
		let (a, b) = tables();
		let base = CombinedModel::combine(&a, 1.0, &b, 2.0).unwrap();
		let scaled = CombinedModel::combine(&a, 4.0, &b, 8.0).unwrap();
		for (key, _) in a.states().chain(b.states()) {
			let left = base.distribution(key).unwrap();
			let right = scaled.distribution(key).unwrap();
			assert_eq!(left.len(), right.len());
			for ((lt, lp), (rt, rp)) in left.iter().zip(&right) {
				assert_eq!(lt, rt);
				assert!((lp - rp).abs() < 1e-12);
			}
		}
	}

	#[test]
	fn rejects_invalid_weights() {
		let (a, b) = tables();
		assert!(matches!(CombinedModel::combine(&a, -1.0, &b, 1.0), Err(RambleError::InvalidWeight(_))));
		assert!(matches!(CombinedModel::combine(&a, 1.0, &b, f64::NAN), Err(RambleError::InvalidWeight(_))));
		assert!(Weights::new(1.0, f64::INFINITY).is_err());
		assert_eq!(Weights::new(2.0, 0.0).unwrap(), Weights { primary: 2.0, classic: 0.0 });
	}

	#[test]
	fn rejects_weights_that_overflow_the_counts() {
		let (a, b) = tables();
		assert!(matches!(CombinedModel::combine(&a, 1e308, &b, 1.0), Err(RambleError::InvalidWeight(w)) if w == 1e308));
		assert!(matches!(CombinedModel::combine(&a, 1.0, &b, f64::MAX), Err(RambleError::InvalidWeight(_))));

		// Each source fits on its own, their sum does not
		assert!(matches!(CombinedModel::combine(&a, 5e307, &b, 5e307), Err(RambleError::InvalidWeight(_))));
		assert!(CombinedModel::combine(&a, 1e300, &b, 1e300).is_ok());
	}

	#[test]
	fn rejects_state_size_mismatch() {
		let a = TransitionTable::build(&[words("a b")], 1).unwrap();
		let b = TransitionTable::build(&[words("a b")], 2).unwrap();
		assert!(matches!(
			CombinedModel::combine(&a, 1.0, &b, 1.0),
			Err(RambleError::StateSizeMismatch { left: 1, right: 2 })
		));
	}

	#[test]
	fn single_table_conversion_matches_table() {
		let (a, _) = tables();
		let model = CombinedModel::from(&a);
		for (key, _) in a.states() {
			assert_eq!(model.distribution(key), a.distribution(key));
		}
	}
}
