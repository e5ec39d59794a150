use std::collections::HashSet;
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::io;

use super::bigram_model::BigramModel;
use super::sampling_options::SamplingOptions;
use super::walk::sample_name;

/// Corpora at least this large are counted on several threads.
const PARALLEL_THRESHOLD: usize = 4096;

/// High-level generator pairing a bigram model with its training names.
///
/// # Responsibilities
/// - Load a corpus from disk and build its model
/// - Sample names with a length guard and an optional fixed seed
/// - Re-sample when the result is already a training name
#[derive(Clone, Debug, Default)]
pub struct Generator {
	name: String,
	model: BigramModel,
	/// Lowercased training names.
	names: HashSet<String>,
}

impl Generator {
	/// Loads a whitespace-separated corpus file and builds its model.
	///
	/// The generator is named after the file stem (`data/names.txt` gives
	/// `"names"`).
	///
	/// # Errors
	/// - `BigramError::Io` if the file cannot be read
	/// - `BigramError::InvalidInput` if it contains no names
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let name = io::get_filename(&filepath)?;
		let corpus = io::read_corpus(&filepath)?;
		let generator = Self::from_names(&name, &corpus)?;
		info!(
			"corpus '{}' loaded: {} names, {} bigrams",
			generator.name,
			corpus.len(),
			generator.model.transition_count()
		);
		Ok(generator)
	}

	/// Builds a generator from an in-memory corpus.
	///
	/// # Errors
	/// Returns `BigramError::InvalidInput` if `names` is empty.
	pub fn from_names<S>(name: &str, names: &[S]) -> Result<Self>
	where
		S: AsRef<str> + Sync,
	{
		let model = if names.len() >= PARALLEL_THRESHOLD {
			BigramModel::build_parallel(names)?
		} else {
			BigramModel::build(names)?
		};

		Ok(Self {
			name: name.to_owned(),
			model,
			names: names.iter().map(|n| n.as_ref().to_lowercase()).collect(),
		})
	}

	/// Name of the corpus this generator was built from.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn model(&self) -> &BigramModel {
		&self.model
	}

	/// Whether `word` is one of the training names (case-insensitive).
	pub fn contains(&self, word: &str) -> bool {
		self.names.contains(&word.to_lowercase())
	}

	/// Generates a name using the random source of `options`.
	///
	/// With a seed, every call returns the same name.
	pub fn generate(&self, options: &SamplingOptions) -> String {
		match options.seed {
			Some(seed) => self.generate_with(&mut StdRng::seed_from_u64(seed), options),
			None => self.generate_with(&mut rand::rng(), options),
		}
	}

	/// Generates a name with an explicit random source.
	///
	/// # Behavior
	/// - Samples one name bounded by `options.max_len()`.
	/// - While it is a training name, re-samples up to `options.nb_try()` times.
	/// - Returns the first new name, or the last attempt if all fail.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, options: &SamplingOptions) -> String {
		let mut word = sample_name(&self.model, rng, options.max_len());
		let mut nb_try = options.nb_try();

		while nb_try > 0 && self.contains(&word) {
			word = sample_name(&self.model, rng, options.max_len());
			nb_try -= 1;
		}

		word
	}
}
