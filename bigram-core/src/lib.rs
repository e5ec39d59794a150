//! Character-level bigram name generation library.
//!
//! This crate provides:
//! - A bigram transition table built from a corpus of names
//! - A lazy weighted random walk that samples new names from the table
//! - A high-level generator with seeding, length guard and duplicate avoidance
//! - Corpus loading helpers
//!
//! The transition table is immutable once built and the random source is
//! always passed in by the caller, so one model can serve any number of
//! concurrent sampling calls.

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// Corpus loading utilities (file reading, whitespace splitting, listing).
pub mod io;

/// Bigram model, sampling walk and generator.
pub mod model;

pub use error::{BigramError, Result};
pub use model::bigram_model::{BigramModel, BigramProbability};
pub use model::generator::Generator;
pub use model::sampling_options::SamplingOptions;
pub use model::symbol::Symbol;
