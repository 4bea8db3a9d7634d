use std::collections::BTreeMap;

use rand::Rng;

use super::token::ChainToken;

/// A transition weight: integer counts while building, real-valued once scaled.
pub trait Count: Copy {
	fn as_weight(self) -> f64;
}

impl Count for u64 {
	fn as_weight(self) -> f64 {
		self as f64
	}
}

impl Count for f64 {
	fn as_weight(self) -> f64 {
		self
	}
}

/// Outgoing transitions of one chain state.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations (or by a scaled count once
/// the table has been combined).
///
/// Transitions are kept ordered so a seeded RNG walks the same path on
/// every run.
///
/// ## Invariants
/// - Every weight is strictly positive
#[derive(Clone, Debug, PartialEq)]
pub struct State<C> {
	/// Outgoing transitions indexed by the next token.
	transitions: BTreeMap<ChainToken, C>,
}

impl<C> Default for State<C> {
	fn default() -> Self {
		Self { transitions: BTreeMap::new() }
	}
}

impl<C: Count> State<C> {
	pub fn transitions(&self) -> impl Iterator<Item = (&ChainToken, C)> {
		self.transitions.iter().map(|(token, count)| (token, *count))
	}

	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	fn total(&self) -> f64 {
		self.transitions.values().map(|count| count.as_weight()).sum()
	}

	/// Whether the summed weight is a finite number, so it can be sampled.
	pub fn is_finite(&self) -> bool {
		self.total().is_finite()
	}

	/// Picks the next token with probability proportional to its weight.
	///
	/// O(n) scan with a cumulative subtraction to select the bucket.
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng>(&self, rng: &mut R) -> Option<&ChainToken> {
		let total = self.total();
		if total.is_nan() || total <= 0.0 {
			return None;
		}

		let mut r = rng.random_range(0.0..total);

		let mut fallback = None;
		for (next, count) in &self.transitions {
			let weight = count.as_weight();
			if r < weight {
				return Some(next);
			}
			r -= weight;
			fallback = Some(next);
		}

		// Rounding can leave a sliver past the last bucket
		fallback
	}

	/// Normalized probability of each next token.
	pub fn distribution(&self) -> Vec<(ChainToken, f64)> {
		let total = self.total();
		self.transitions
			.iter()
			.map(|(token, count)| (token.clone(), count.as_weight() / total))
			.collect()
	}
}

impl State<u64> {
	/// Records one more occurrence of a transition toward `next`.
	pub fn add_transition(&mut self, next: ChainToken) {
		*self.transitions.entry(next).or_insert(0) += 1;
	}
}

impl State<f64> {
	/// Adds another state's counts, each multiplied by `weight`.
	///
	/// Callers skip zero weights, which keeps every stored weight positive.
	pub fn absorb<C: Count>(&mut self, other: &State<C>, weight: f64) {
		for (next, count) in &other.transitions {
			*self.transitions.entry(next.clone()).or_insert(0.0) += count.as_weight() * weight;
		}
	}
}
