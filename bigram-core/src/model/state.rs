use std::collections::BTreeMap;

use crate::error::{BigramError, Result};

use super::distribution::Distribution;
use super::symbol::Symbol;

/// Transition counts observed after one symbol.
///
/// A `State` corresponds to a "current symbol" (`key`) and stores how many
/// times each next symbol followed it in the training corpus.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning
/// - Merge with another state having the same key (parallel learning support)
/// - Normalize into a `Distribution`
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Current symbol this state describes.
	key: Symbol,
	/// Outgoing transitions indexed by the next symbol.
	/// Example: { 'n' => 3, <END> => 2 }
	transitions: BTreeMap<Symbol, usize>,
}

impl State {
	/// Creates a new empty state for the given symbol.
	pub fn new(key: Symbol) -> Self {
		Self {
			key,
			transitions: BTreeMap::new(),
		}
	}

	pub fn key(&self) -> Symbol {
		self.key
	}

	/// Records one occurrence of `key -> next`.
	pub fn add_transition(&mut self, next: Symbol) {
		*self.transitions.entry(next).or_insert(0) += 1;
	}

	/// Number of times `key -> next` was observed.
	pub fn occurrences(&self, next: Symbol) -> usize {
		self.transitions.get(&next).copied().unwrap_or(0)
	}

	/// Total number of observed transitions out of `key`.
	pub fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Merges another state into this one, summing occurrence counts.
	///
	/// # Errors
	/// Returns `BigramError::KeyMismatch` if the state keys differ.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.key != other.key {
			return Err(BigramError::KeyMismatch {
				expected: self.key,
				found: other.key,
			});
		}

		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(*next).or_insert(0) += *occurrence;
		}

		Ok(())
	}

	/// Divides every count by the total, producing the conditional
	/// distribution of the next symbol.
	///
	/// Returns `None` if nothing was ever observed after `key`.
	pub fn to_distribution(&self) -> Option<Distribution> {
		Distribution::from_counts(&self.transitions)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_accumulate_per_next_symbol() {
		let mut state = State::new(Symbol::Char('a'));
		state.add_transition(Symbol::Char('n'));
		state.add_transition(Symbol::End);
		state.add_transition(Symbol::Char('n'));

		assert_eq!(state.occurrences(Symbol::Char('n')), 2);
		assert_eq!(state.occurrences(Symbol::End), 1);
		assert_eq!(state.occurrences(Symbol::Char('z')), 0);
		assert_eq!(state.total(), 3);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = State::new(Symbol::Start);
		left.add_transition(Symbol::Char('a'));
		let mut right = State::new(Symbol::Start);
		right.add_transition(Symbol::Char('a'));
		right.add_transition(Symbol::Char('m'));

		left.merge(&right).unwrap();

		assert_eq!(left.occurrences(Symbol::Char('a')), 2);
		assert_eq!(left.occurrences(Symbol::Char('m')), 1);
	}

	#[test]
	fn merge_rejects_other_key() {
		let mut left = State::new(Symbol::Start);
		let right = State::new(Symbol::Char('a'));

		let err = left.merge(&right).unwrap_err();
		assert!(matches!(
			err,
			BigramError::KeyMismatch { expected: Symbol::Start, found: Symbol::Char('a') }
		));
	}

	#[test]
	fn empty_state_has_no_distribution() {
		assert!(State::new(Symbol::Start).to_distribution().is_none());
	}
}
