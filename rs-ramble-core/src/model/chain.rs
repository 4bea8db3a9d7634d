use rand::Rng;

use super::token::ChainToken;

/// Read-only view of a Markov chain that the sampler can walk.
///
/// Implemented by single-corpus [`TransitionTable`](super::table::TransitionTable)s
/// and by weighted [`CombinedModel`](super::combined::CombinedModel)s, so the
/// same sampler drives both.
pub trait Chain {
	/// Number of tokens in a state window.
	fn state_size(&self) -> usize;

	/// Draws the token following `state`, or `None` if the state is unknown.
	fn next_token<R: Rng>(&self, state: &[ChainToken], rng: &mut R) -> Option<&ChainToken>;

	/// Normalized next-token probabilities for `state`.
	fn distribution(&self, state: &[ChainToken]) -> Option<Vec<(ChainToken, f64)>>;

	/// Training sentences, rejoined the way generated sentences are.
	///
	/// Used to reject output that copies the source too closely.
	fn source_sentences(&self) -> &[String];
}
