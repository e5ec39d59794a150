//! Top-level module for the bigram generation system.
//!
//! - Symbols, including the START/END sentinels (`Symbol`)
//! - Transition counting per current symbol (`State`)
//! - Normalized outgoing distributions (`Distribution`)
//! - The immutable transition table (`BigramModel`)
//! - The lazy sampling walk (`Walk`)
//! - Generation parameters (`SamplingOptions`)
//! - A high-level generation interface (`Generator`)

/// Alphabet of the model: characters plus START and END sentinels.
pub mod symbol;

/// Transition counts observed after one symbol.
///
/// Only used while building; merged across threads by the parallel builder.
pub mod state;

/// Conditional probability distribution over next symbols.
///
/// Performs the single weighted draw used by the sampler.
pub mod distribution;

/// Bigram counts and the normalized transition table.
pub mod bigram_model;

/// Lazy weighted random walk over a transition table.
pub mod walk;

/// Generation parameters (length guard, retries, seed).
pub mod sampling_options;

/// High-level interface pairing a model with its training names.
pub mod generator;
