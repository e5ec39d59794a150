use std::iter::FusedIterator;

use log::debug;
use rand::Rng;

use super::bigram_model::BigramModel;
use super::symbol::Symbol;

/// Lazy weighted random walk over a `BigramModel`.
///
/// Starts at `Start` and yields one character per step. The walk is over
/// (and stays over) once any of these happens:
/// - `End` is drawn
/// - the current symbol has no row in the table (dead end)
/// - `max_len` characters have been yielded
///
/// The walk only borrows the model; all randomness comes from `rng`.
pub struct Walk<'a, R: Rng + ?Sized> {
	model: &'a BigramModel,
	rng: &'a mut R,
	current: Symbol,
	emitted: usize,
	max_len: usize,
	done: bool,
}

impl<'a, R: Rng + ?Sized> Walk<'a, R> {
	pub(crate) fn new(model: &'a BigramModel, rng: &'a mut R, max_len: usize) -> Self {
		Self {
			model,
			rng,
			current: Symbol::Start,
			emitted: 0,
			max_len,
			done: false,
		}
	}

	/// Number of characters yielded so far.
	pub fn emitted(&self) -> usize {
		self.emitted
	}
}

impl<R: Rng + ?Sized> Iterator for Walk<'_, R> {
	type Item = char;

	fn next(&mut self) -> Option<char> {
		if self.done {
			return None;
		}

		if self.emitted >= self.max_len {
			debug!("walk stopped by the length guard after {} characters", self.emitted);
			self.done = true;
			return None;
		}

		let model = self.model;
		let Some(distribution) = model.distribution(self.current) else {
			debug!("walk reached a dead end at {}", self.current);
			self.done = true;
			return None;
		};

		// End is the only sampled symbol without a character
		match distribution.sample(&mut *self.rng).and_then(|next| next.as_char()) {
			Some(c) => {
				self.current = Symbol::Char(c);
				self.emitted += 1;
				Some(c)
			}
			None => {
				self.done = true;
				None
			}
		}
	}
}

impl<R: Rng + ?Sized> FusedIterator for Walk<'_, R> {}

/// Samples one name: collects a walk and trims surrounding whitespace.
pub fn sample_name<R: Rng + ?Sized>(model: &BigramModel, rng: &mut R, max_len: usize) -> String {
	let name: String = model.walk(rng, max_len).collect();
	name.trim().to_owned()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn empty_model_yields_nothing() {
		let model = BigramModel::default();
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(sample_name(&model, &mut rng, 64), "");
	}

	#[test]
	fn certain_chain_reproduces_the_name() {
		let model = BigramModel::build(["Kim"]).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		assert_eq!(sample_name(&model, &mut rng, 64), "kim");
	}

	#[test]
	fn length_guard_stops_endless_chains() {
		// 'a' loops on itself 99 times out of 100
		let name = "a".repeat(100);
		let model = BigramModel::build([name.as_str()]).unwrap();
		let mut rng = StdRng::seed_from_u64(5);

		let mut walk = model.walk(&mut rng, 3);
		let collected: String = walk.by_ref().collect();

		assert!(collected.chars().count() <= 3);
		assert_eq!(walk.emitted(), collected.chars().count());
		assert_eq!(walk.next(), None);
	}

	#[test]
	fn zero_length_guard_yields_nothing() {
		let model = BigramModel::build(["ana"]).unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		assert_eq!(model.walk(&mut rng, 0).count(), 0);
	}

	#[test]
	fn whitespace_in_names_is_trimmed_from_the_ends() {
		let model = BigramModel::build([" x "]).unwrap();
		let mut rng = StdRng::seed_from_u64(9);
		assert_eq!(sample_name(&model, &mut rng, 64), "x");
	}
}
