use thiserror::Error;

use crate::model::symbol::Symbol;

/// Errors produced while loading a corpus or building a model.
///
/// Sampling itself never fails: a symbol without outgoing transitions is a
/// regular dead end, not an error.
#[derive(Debug, Error)]
pub enum BigramError {
	/// The caller supplied something the model cannot be built from,
	/// such as an empty training corpus or an out-of-range option.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// Two transition states with different keys were merged.
	#[error("state key mismatch: expected {expected}, found {found}")]
	KeyMismatch { expected: Symbol, found: Symbol },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, BigramError>;
