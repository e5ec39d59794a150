use std::collections::BTreeMap;

use rand::Rng;

use super::symbol::Symbol;

/// Conditional probability distribution of the symbol following a given one.
///
/// Candidates are stored most likely first, ties broken by symbol order.
/// The order is fixed at construction, so the same random draw always maps
/// to the same symbol, and a draw of `0.0` always lands on the most likely
/// candidate.
///
/// # Invariants
/// - At least one candidate
/// - Every probability lies in (0, 1]
/// - Probabilities sum to 1 within floating-point tolerance
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
	candidates: Vec<(Symbol, f64)>,
}

impl Distribution {
	/// Normalizes raw occurrence counts.
	///
	/// Returns `None` when there is nothing to normalize.
	pub(crate) fn from_counts(counts: &BTreeMap<Symbol, usize>) -> Option<Self> {
		let total: usize = counts.values().sum();
		if total == 0 {
			return None;
		}

		let mut candidates: Vec<(Symbol, f64)> = counts
			.iter()
			.filter(|(_, occurrence)| **occurrence > 0)
			.map(|(next, occurrence)| (*next, *occurrence as f64 / total as f64))
			.collect();
		candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

		Some(Self { candidates })
	}

	/// Number of distinct next symbols.
	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	/// Iterates over `(next, probability)`, most likely first.
	pub fn iter(&self) -> impl Iterator<Item = (Symbol, f64)> + '_ {
		self.candidates.iter().copied()
	}

	/// Probability of `next`, or `None` if it was never observed.
	pub fn probability(&self, next: Symbol) -> Option<f64> {
		self.candidates
			.iter()
			.find(|(candidate, _)| *candidate == next)
			.map(|(_, probability)| *probability)
	}

	/// The candidate with the highest probability.
	pub fn most_likely(&self) -> Option<Symbol> {
		self.candidates.first().map(|(next, _)| *next)
	}

	/// Sum of all stored probabilities (1.0 up to rounding).
	pub fn total(&self) -> f64 {
		self.candidates.iter().map(|(_, probability)| probability).sum()
	}

	/// Draws the next symbol with a single weighted draw.
	///
	/// One uniform value is scaled by the total weight and walked down the
	/// cumulative distribution: a candidate is picked with probability equal
	/// to its stored weight.
	///
	/// Returns `None` if the distribution carries no weight.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Symbol> {
		let total = self.total();
		if total <= 0.0 {
			return None;
		}

		let mut r = rng.random::<f64>() * total;

		let mut fallback: Option<Symbol> = None;
		for (next, probability) in &self.candidates {
			if r < *probability {
				return Some(*next);
			}
			r -= probability;
			fallback = Some(*next);
		}

		// Rounding can leave `r` just past the last bucket.
		fallback
	}
}
