//! Markov-chain sentence generation from two blended corpora.
//!
//! This crate provides:
//! - Corpus loading and regex-based cleaning
//! - Sentence splitting and part-of-speech tagging behind a `Tokenizer` seam
//! - Word-level n-gram transition tables keyed by tagged tokens
//! - Weighted combination of two tables
//! - Bounded random walks that ramble out one sentence
//!
//! ```no_run
//! use rs_ramble_core::corpus::DirectoryArchive;
//! use rs_ramble_core::model::combined::Weights;
//! use rs_ramble_core::model::generator::Generator;
//! use rs_ramble_core::model::sampler::SamplerConfig;
//! use rs_ramble_core::tokenize::RuleTagger;
//!
//! let archive = DirectoryArchive::new("./data/gutenberg");
//! let generator = Generator::from_sources(
//!     "tns.txt",
//!     &archive,
//!     Weights::default(),
//!     3,
//!     RuleTagger::new(),
//!     SamplerConfig::default(),
//! )?;
//! println!("{}", generator.generate(&mut rand::rng())?);
//! # Ok::<(), rs_ramble_core::error::RambleError>(())
//! ```

/// Noise removal for raw corpus text.
pub mod clean;

/// Corpus archives and loaders.
pub mod corpus;

/// Crate error type.
pub mod error;

/// Chain models, combination and sampling.
pub mod model;

/// Sentence splitting and tagging.
pub mod tokenize;

/// I/O utilities (file loading, directory listing).
///
/// Not exposed
pub(crate) mod io;

pub use error::{RambleError, Result};
