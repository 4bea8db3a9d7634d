//! Error type shared by every stage of the pipeline.

use std::path::PathBuf;

/// Result alias using [`RambleError`] by default.
pub type Result<T, E = RambleError> = std::result::Result<T, E>;

/// Errors produced while loading corpora, building models or sampling.
///
/// Only [`RambleError::NoSentence`] is recoverable: the generator falls back to
/// a single direct sampling attempt on it. Every other variant is fatal for the
/// invocation and surfaces unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RambleError {
	/// A corpus file could not be read.
	#[error("failed to read '{}': {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A named work is missing from the corpus archive.
	#[error("work '{name}' is not available in the corpus archive: {source}")]
	MissingWork {
		name: String,
		#[source]
		source: std::io::Error,
	},

	/// The chain window must hold at least one token.
	#[error("state size must be >= 1, got {0}")]
	InvalidStateSize(usize),

	/// Combination weights must be finite and non-negative.
	#[error("weight must be a finite non-negative number, got {0}")]
	InvalidWeight(f64),

	/// Two tables with different window sizes cannot be combined.
	#[error("state size mismatch: {left} vs {right}")]
	StateSizeMismatch { left: usize, right: usize },

	/// A sampler parameter is out of range.
	#[error("invalid sampler setting: {0}")]
	InvalidConfig(String),

	/// The user lexicon could not be parsed.
	#[error("invalid lexicon: {0}")]
	Lexicon(#[from] serde_json::Error),

	/// No sentence could be sampled within the allowed attempts.
	#[error("no sentence available after {attempts} attempt(s)")]
	NoSentence { attempts: usize },
}

impl RambleError {
	/// Returns `true` for the sampling exhaustion case, the only error the
	/// generator recovers from.
	pub fn is_no_sentence(&self) -> bool {
		matches!(self, RambleError::NoSentence { .. })
	}
}
