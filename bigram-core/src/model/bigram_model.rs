use std::collections::BTreeMap;
use std::iter;
use std::sync::mpsc;
use std::thread;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BigramError, Result};

use super::distribution::Distribution;
use super::state::State;
use super::symbol::Symbol;
use super::walk::Walk;

/// Raw bigram counts, one `State` per current symbol.
///
/// # Responsibilities
/// - Wrap each name in START/END and count every adjacent pair
/// - Merge with counts built from another part of the corpus
/// - Normalize into a `BigramModel`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BigramCounts {
	states: BTreeMap<Symbol, State>,
	names: usize,
}

impl BigramCounts {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds one training name.
	///
	/// The name is lowercased and wrapped as `Start, chars..., End`; every
	/// adjacent pair of that sequence is counted. An empty name contributes
	/// a single `Start -> End` transition.
	pub fn add_name(&mut self, name: &str) {
		let lowered = name.to_lowercase();

		let mut current = Symbol::Start;
		for next in lowered.chars().map(Symbol::Char).chain(iter::once(Symbol::End)) {
			self.states
				.entry(current)
				.or_insert_with(|| State::new(current))
				.add_transition(next);
			current = next;
		}
		self.names += 1;
	}

	/// Number of names added so far.
	pub fn names(&self) -> usize {
		self.names
	}

	/// Merges counts from another part of the corpus.
	///
	/// # Errors
	/// Propagates `BigramError::KeyMismatch` from `State::merge`, which
	/// cannot happen for states indexed by their own key.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		for state in other.states.values() {
			match self.states.get_mut(&state.key()) {
				Some(existing) => existing.merge(state)?,
				None => {
					self.states.insert(state.key(), state.clone());
				}
			}
		}
		self.names += other.names;

		Ok(())
	}

	/// Converts the counts into conditional probabilities.
	pub fn normalize(&self) -> BigramModel {
		let table = self
			.states
			.iter()
			.filter_map(|(key, state)| state.to_distribution().map(|distribution| (*key, distribution)))
			.collect();
		BigramModel { table }
	}
}

/// One flattened entry of the transition table, as drawn in a bar chart.
///
/// `bigram` concatenates the display forms of both symbols, for example
/// `"<START>a"`, `"an"` or `"a<END>"`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BigramProbability {
	pub bigram: String,
	pub probability: f64,
}

/// Bigram transition table.
///
/// Maps each current symbol (`Start` or a character) to the distribution of
/// the symbol that follows it. Built once, read-only afterwards: sampling
/// borrows it immutably, so a single model can be shared across threads.
///
/// # Invariants
/// - Every key has at least one outgoing transition
/// - A symbol never followed by anything during training is absent
/// - `End` is never a key and `Start` is never a target
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BigramModel {
	table: BTreeMap<Symbol, Distribution>,
}

impl BigramModel {
	/// Builds the model from a corpus of names.
	///
	/// # Errors
	/// Returns `BigramError::InvalidInput` if the corpus is empty.
	pub fn build<I, S>(names: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut counts = BigramCounts::new();
		for name in names {
			counts.add_name(name.as_ref());
		}
		Self::from_counts(&counts)
	}

	/// Builds the model by counting chunks of the corpus on separate threads.
	///
	/// The corpus is split into `cpus * 8` chunks; partial counts are sent
	/// back over a channel and merged before normalization. The resulting
	/// table is identical to the one produced by `build`.
	///
	/// # Errors
	/// Returns `BigramError::InvalidInput` if the corpus is empty.
	pub fn build_parallel<S>(names: &[S]) -> Result<Self>
	where
		S: AsRef<str> + Sync,
	{
		if names.is_empty() {
			return Err(empty_corpus());
		}

		let chunks = num_cpus::get() * 8;
		let chunk_size = names.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in names.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = BigramCounts::new();
					for name in chunk {
						partial.add_name(name.as_ref());
					}
					// The receiver is alive until every worker has been joined.
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		let mut counts = BigramCounts::new();
		for partial in rx.iter() {
			counts.merge(&partial)?;
		}

		Self::from_counts(&counts)
	}

	fn from_counts(counts: &BigramCounts) -> Result<Self> {
		if counts.names() == 0 {
			return Err(empty_corpus());
		}

		let model = counts.normalize();
		debug!(
			"bigram model built from {} names: {} states, {} transitions",
			counts.names(),
			model.len(),
			model.transition_count()
		);
		Ok(model)
	}

	/// Number of current symbols with outgoing transitions.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Total number of distinct bigrams in the table.
	pub fn transition_count(&self) -> usize {
		self.table.values().map(Distribution::len).sum()
	}

	/// Distribution of the symbol following `current`.
	///
	/// `None` means `current` is a dead end.
	pub fn distribution(&self, current: Symbol) -> Option<&Distribution> {
		self.table.get(&current)
	}

	/// Probability of `current -> next`, or `None` if never observed.
	pub fn probability(&self, current: Symbol, next: Symbol) -> Option<f64> {
		self.distribution(current)?.probability(next)
	}

	/// Iterates over every row of the table in symbol order.
	pub fn states(&self) -> impl Iterator<Item = (Symbol, &Distribution)> {
		self.table.iter().map(|(key, distribution)| (*key, distribution))
	}

	/// Flattens the table into `(bigram, probability)` pairs.
	///
	/// Rows come in symbol order and so do the entries of each row.
	pub fn bigram_probabilities(&self) -> Vec<BigramProbability> {
		let mut flattened = Vec::with_capacity(self.transition_count());
		for (current, distribution) in self.states() {
			let mut row: Vec<(Symbol, f64)> = distribution.iter().collect();
			row.sort_by_key(|(next, _)| *next);
			flattened.extend(row.into_iter().map(|(next, probability)| BigramProbability {
				bigram: format!("{current}{next}"),
				probability,
			}));
		}
		flattened
	}

	/// Starts a lazy random walk from `Start`.
	///
	/// The walk yields at most `max_len` characters.
	pub fn walk<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R, max_len: usize) -> Walk<'a, R> {
		Walk::new(self, rng, max_len)
	}
}

fn empty_corpus() -> BigramError {
	BigramError::InvalidInput("training corpus is empty".to_owned())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn c(c: char) -> Symbol {
		Symbol::Char(c)
	}

	#[test]
	fn ana_is_wrapped_in_sentinels() {
		let model = BigramModel::build(["ana"]).unwrap();

		assert_eq!(model.probability(Symbol::Start, c('a')), Some(1.0));
		assert_eq!(model.probability(c('a'), c('n')), Some(0.5));
		assert_eq!(model.probability(c('a'), Symbol::End), Some(0.5));
		assert_eq!(model.probability(c('n'), c('a')), Some(1.0));
		assert_eq!(model.len(), 3);
		assert!(model.distribution(Symbol::End).is_none());
	}

	#[test]
	fn no_space_symbol_is_modeled() {
		let model = BigramModel::build(["ava", "mia"]).unwrap();
		assert!(model.distribution(c(' ')).is_none());
		assert!(model.states().all(|(_, d)| d.probability(c(' ')).is_none()));
	}

	#[test]
	fn names_are_lowercased() {
		let lower = BigramModel::build(["ana"]).unwrap();
		let mixed = BigramModel::build(["AnA"]).unwrap();
		assert_eq!(lower, mixed);
	}

	#[test]
	fn empty_corpus_is_invalid_input() {
		let names: Vec<String> = Vec::new();
		assert!(matches!(BigramModel::build(&names), Err(BigramError::InvalidInput(_))));
		assert!(matches!(BigramModel::build_parallel(&names), Err(BigramError::InvalidInput(_))));
	}

	#[test]
	fn empty_name_goes_straight_to_end() {
		let model = BigramModel::build([""]).unwrap();
		assert_eq!(model.len(), 1);
		assert_eq!(model.probability(Symbol::Start, Symbol::End), Some(1.0));
	}

	#[test]
	fn counts_merge_like_a_single_pass() {
		let mut left = BigramCounts::new();
		left.add_name("ava");
		let mut right = BigramCounts::new();
		right.add_name("mia");
		left.merge(&right).unwrap();

		let mut single = BigramCounts::new();
		single.add_name("ava");
		single.add_name("mia");

		assert_eq!(left, single);
		assert_eq!(left.names(), 2);
	}

	#[test]
	fn parallel_build_matches_sequential_build() {
		let names: Vec<String> = (0..500).map(|i| format!("name{}x{}", i % 7, i % 13)).collect();
		let sequential = BigramModel::build(&names).unwrap();
		let parallel = BigramModel::build_parallel(&names).unwrap();
		assert_eq!(sequential, parallel);
	}

	#[test]
	fn flattened_pairs_follow_symbol_order() {
		let model = BigramModel::build(["ab", "a"]).unwrap();
		let bigrams: Vec<(String, f64)> = model
			.bigram_probabilities()
			.into_iter()
			.map(|entry| (entry.bigram, entry.probability))
			.collect();

		assert_eq!(
			bigrams,
			vec![
				("<START>a".to_owned(), 1.0),
				("ab".to_owned(), 0.5),
				("a<END>".to_owned(), 0.5),
				("b<END>".to_owned(), 1.0),
			]
		);
		assert_eq!(model.transition_count(), 4);
	}
}
