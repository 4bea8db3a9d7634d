//! Sentence splitting, word tagging and the tokenizer seam.
//!
//! The chain never sees bare words: every state is built from
//! [`TaggedToken`]s so that two identical surfaces with different
//! grammatical roles are different states. Which tagger produces them is a
//! choice of the caller, expressed through the [`Tokenizer`] trait.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Rule-based English part-of-speech tagger.
pub mod tagger;

pub use tagger::{Lexicon, RuleTagger};

/// A word annotated with its grammatical tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaggedToken {
	pub surface: String,
	pub tag: String,
}

impl TaggedToken {
	pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
		Self { surface: surface.into(), tag: tag.into() }
	}
}

impl fmt::Display for TaggedToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{}", self.surface, self.tag)
	}
}

/// Pluggable tokenizer/detokenizer pair used by the chain builder.
///
/// Implementors decide how text is cut into sentences and how each word is
/// tagged. `word_join` is the inverse used to turn a sampled sequence back
/// into text.
pub trait Tokenizer {
	/// Splits cleaned text into sentences, in order.
	fn split_sentences(&self, text: &str) -> Vec<String>;

	/// Splits one sentence into tagged words.
	fn word_split(&self, sentence: &str) -> Vec<TaggedToken>;

	/// Drops the tags and joins the surfaces with single spaces.
	fn word_join(&self, tokens: &[TaggedToken]) -> String {
		tokens.iter().map(|t| t.surface.as_str()).collect::<Vec<_>>().join(" ")
	}

	/// Splits text into sentences of tagged words.
	///
	/// Sentences of one character or less are discarded, as are sentences
	/// that produce no words.
	fn tag_and_split(&self, text: &str) -> Vec<Vec<TaggedToken>> {
		self.split_sentences(text)
			.iter()
			.filter(|s| s.chars().count() > 1)
			.map(|s| self.word_split(s))
			.filter(|words| !words.is_empty())
			.collect()
	}
}

static POTENTIAL_END: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([\w.'’&\])]+[.?!])([‘’“”'")\]]*)(\s+)"#).unwrap()
});
static REJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(^')|('$)|\s'|'\s|["()\[\]]"#).unwrap());

const CAPPED_ABBREVIATIONS: &[&str] = &[
	"mr", "mrs", "ms", "dr", "st", "jr", "sr", "gen", "col", "lt", "capt", "rev", "prof", "hon", "gov",
	"sen", "rep", "mt", "ft", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
	"nov", "dec",
];
const LOWER_ABBREVIATIONS: &[&str] = &["etc", "v", "vs", "viz", "al", "pct", "e.g", "i.e", "cf"];

fn is_abbreviation(dotted_word: &str) -> bool {
	let clipped = dotted_word.trim_end_matches('.');
	let mut chars = clipped.chars();
	match chars.next() {
		None => false,
		// A lone capital is an initial ("J. Caesar")
		Some(first) if first.is_uppercase() && chars.next().is_none() => true,
		Some(first) if first.is_uppercase() => {
			CAPPED_ABBREVIATIONS.contains(&clipped.to_lowercase().as_str())
		}
		Some(_) => LOWER_ABBREVIATIONS.contains(&clipped),
	}
}

fn is_sentence_ender(word: &str) -> bool {
	match word.chars().last() {
		Some('?') | Some('!') => true,
		Some('.') => !is_abbreviation(word),
		_ => false,
	}
}

/// Splits text into sentences on terminal punctuation.
///
/// A boundary is a word ending in `.`, `?` or `!` (optionally followed by
/// closing quotes or brackets), then whitespace, then anything other than a
/// lowercase letter or a dash. Abbreviations and single-letter initials do
/// not end a sentence.
pub fn split_into_sentences(text: &str) -> Vec<String> {
	let mut sentences = Vec::new();
	let mut start = 0;

	for caps in POTENTIAL_END.captures_iter(text) {
		let (Some(word), Some(closers), Some(space)) = (caps.get(1), caps.get(2), caps.get(3)) else {
			continue;
		};
		let follows_lower = text[space.end()..]
			.chars()
			.next()
			.is_some_and(|c| c.is_lowercase() || matches!(c, '-' | '–' | '—'));
		if follows_lower || !is_sentence_ender(word.as_str()) {
			continue;
		}
		let end = closers.end();
		if end > start {
			sentences.push(text[start..end].trim().to_owned());
		}
		start = end;
	}

	let rest = text[start..].trim();
	if !rest.is_empty() {
		sentences.push(rest.to_owned());
	}
	sentences.retain(|s| !s.is_empty());
	sentences
}

/// Whether a sentence is clean enough to train on.
///
/// Stray quotes and brackets usually mean a sentence was cut in the middle
/// of a quotation, which produces unbalanced output.
pub fn is_trainable(sentence: &str) -> bool {
	!REJECT.is_match(sentence)
}
