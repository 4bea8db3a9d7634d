//! Markov chain models and sentence generation.
//!
//! This module provides:
//! - Per-corpus transition counts (`TransitionTable`)
//! - Weighted combination of two tables (`CombinedModel`)
//! - Random walks over either (`Sampler`)
//! - The end-to-end pipeline with its fallback (`Generator`)

/// Read-only chain interface shared by tables and combined models.
pub mod chain;

/// Weighted union of transition tables.
///
/// Scales counts by corpus weight and sums them per state.
pub mod combined;

/// High-level interface building the blended model and generating sentences.
pub mod generator;

/// Random walk from the begin state to the end state.
///
/// Holds the sampling configuration, the overlap test and the bounded
/// retry loop.
pub mod sampler;

/// Outgoing transitions of one chain state and weighted sampling.
pub mod state;

/// Transition counts learned from a single corpus.
pub mod table;

/// Chain tokens: sentence boundaries and tagged words.
pub mod token;
