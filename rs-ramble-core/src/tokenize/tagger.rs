use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::{TaggedToken, Tokenizer, split_into_sentences};
use crate::error::Result;
use crate::io::read_file;

static WORDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+(?:['’-]\w+)*|[^\w\s]").unwrap());

const DETERMINERS: &[&str] = &[
	"the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no", "all",
	"both", "either", "neither", "another", "such",
];
const PRONOUNS: &[&str] = &[
	"i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he", "him", "his",
	"himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our", "ours",
	"they", "them", "their", "theirs", "who", "whom", "whose", "what", "which", "thou", "thee", "thy",
	"thine", "ye", "something", "nothing", "everything", "anything", "someone", "everyone",
];
const ADPOSITIONS: &[&str] = &[
	"of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "upon", "over", "under",
	"about", "against", "between", "through", "without", "within", "after", "before", "across",
	"among", "toward", "towards", "unto", "o'er",
];
const CONJUNCTIONS: &[&str] = &["and", "but", "or", "nor", "yet", "so"];
const SUBORDINATORS: &[&str] = &["if", "because", "though", "although", "while", "whilst", "since", "unless", "whether", "till", "until", "than"];
const AUXILIARIES: &[&str] = &[
	"is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
	"did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "hath", "doth",
	"art", "dost", "shalt", "wilt", "wast", "wert", "hast",
];
const PARTICLES: &[&str] = &["not", "'s", "n't", "'tis"];
const INTERJECTIONS: &[&str] = &["oh", "o", "ah", "alas", "yes", "ay", "nay", "hello", "well", "fie"];
const ADVERBS: &[&str] = &[
	"here", "there", "now", "then", "never", "ever", "always", "very", "too", "again", "still",
	"thus", "hence", "where", "when", "why", "how", "soon", "once", "just",
];

const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify", "eth", "est"];
const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "ive", "less", "ic", "ish", "al"];
const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ness", "ment", "ity", "ship", "ism", "ist", "er"];

/// Word to tag overrides supplied by the caller.
///
/// Parsed from a flat JSON object, `{"word": "TAG", ...}`. Keys are matched
/// case-insensitively.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(from = "HashMap<String, String>")]
pub struct Lexicon {
	entries: HashMap<String, String>,
}

impl Lexicon {
	/// Parses a lexicon from a JSON string.
	pub fn from_json_str(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads and parses a JSON lexicon file.
	pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
		let lexicon = Self::from_json_str(&read_file(path)?)?;
		debug!(entries = lexicon.len(), "lexicon loaded");
		Ok(lexicon)
	}

	pub fn insert(&mut self, word: &str, tag: &str) {
		self.entries.insert(word.to_lowercase(), tag.to_owned());
	}

	pub fn get(&self, word: &str) -> Option<&str> {
		self.entries.get(&word.to_lowercase()).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl From<HashMap<String, String>> for Lexicon {
	fn from(entries: HashMap<String, String>) -> Self {
		entries.into_iter().collect()
	}
}

impl FromIterator<(String, String)> for Lexicon {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		let mut lexicon = Lexicon::default();
		for (word, tag) in iter {
			lexicon.insert(&word, &tag);
		}
		lexicon
	}
}

/// Heuristic English tagger producing Universal POS tags.
///
/// Resolution order for each word:
/// 1. the caller's [`Lexicon`]
/// 2. punctuation and numbers
/// 3. closed-class word lists (including Early Modern forms like *thou*, *hath*)
/// 4. capitalised words past the first position as `PROPN`
/// 5. suffix rules, then `NOUN`
///
/// It is cheap and deterministic, which is all the chain needs: the tag only
/// has to separate grammatical roles well enough to keep walks plausible.
#[derive(Clone, Debug, Default)]
pub struct RuleTagger {
	lexicon: Lexicon,
}

impl RuleTagger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_lexicon(lexicon: Lexicon) -> Self {
		Self { lexicon }
	}

	/// Tags a single word given its position in the sentence.
	pub fn tag(&self, word: &str, position: usize) -> String {
		if let Some(tag) = self.lexicon.get(word) {
			return tag.to_owned();
		}
		if !word.chars().any(char::is_alphanumeric) {
			return "PUNCT".to_owned();
		}
		if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
			return "NUM".to_owned();
		}

		let lower = word.to_lowercase();
		let closed = [
			(DETERMINERS, "DET"),
			(PRONOUNS, "PRON"),
			(AUXILIARIES, "AUX"),
			(PARTICLES, "PART"),
			(ADPOSITIONS, "ADP"),
			(CONJUNCTIONS, "CCONJ"),
			(SUBORDINATORS, "SCONJ"),
			(INTERJECTIONS, "INTJ"),
			(ADVERBS, "ADV"),
		];
		for (words, tag) in closed {
			if words.contains(&lower.as_str()) {
				return tag.to_owned();
			}
		}

		if position > 0 && word.chars().next().is_some_and(char::is_uppercase) {
			return "PROPN".to_owned();
		}

		let suffixed = |suffixes: &[&str]| suffixes.iter().any(|s| lower.len() > s.len() + 1 && lower.ends_with(s));
		let tag = if lower.len() > 3 && lower.ends_with("ly") {
			"ADV"
		} else if suffixed(VERB_SUFFIXES) {
			"VERB"
		} else if suffixed(NOUN_SUFFIXES) {
			"NOUN"
		} else if suffixed(ADJ_SUFFIXES) {
			"ADJ"
		} else {
			"NOUN"
		};
		tag.to_owned()
	}
}

impl Tokenizer for RuleTagger {
	fn split_sentences(&self, text: &str) -> Vec<String> {
		split_into_sentences(text)
	}

	fn word_split(&self, sentence: &str) -> Vec<TaggedToken> {
		WORDS
			.find_iter(sentence)
			.enumerate()
			.map(|(position, word)| TaggedToken::new(word.as_str(), self.tag(word.as_str(), position)))
			.collect()
	}
}
