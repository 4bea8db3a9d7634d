use std::fmt;

use crate::tokenize::TaggedToken;

/// One position in a chain state.
///
/// `Begin` pads the window before the first word of a sentence and `End`
/// is the single terminal transition after its last word. Neither can be
/// produced by a tokenizer, so they never collide with real words.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainToken {
	Begin,
	Word(TaggedToken),
	End,
}

impl From<TaggedToken> for ChainToken {
	fn from(token: TaggedToken) -> Self {
		ChainToken::Word(token)
	}
}

impl fmt::Display for ChainToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ChainToken::Begin => f.write_str("___BEGIN__"),
			ChainToken::Word(token) => token.fmt(f),
			ChainToken::End => f.write_str("___END__"),
		}
	}
}

/// A window of the `state_size` most recent tokens.
pub type StateKey = Vec<ChainToken>;

/// The state every walk starts from: `state_size` copies of [`ChainToken::Begin`].
pub fn begin_state(state_size: usize) -> StateKey {
	vec![ChainToken::Begin; state_size]
}
