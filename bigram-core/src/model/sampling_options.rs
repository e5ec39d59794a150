use crate::error::{BigramError, Result};

/// Default upper bound on the length of a generated name.
pub const DEFAULT_MAX_LEN: usize = 64;

/// Largest accepted length guard.
pub const MAX_MAX_LEN: usize = 1024;

/// Largest accepted number of extra attempts.
pub const MAX_NB_TRY: usize = 1000;

/// Parameters controlling how names are sampled by `Generator`.
///
/// # Responsibilities
/// - Bound the walk with a length guard (`max_len`)
/// - Track how many times to re-sample when a training name comes out (`nb_try`)
/// - Optionally fix the random seed for reproducible output (`seed`)
///
/// # Invariants
/// - `1 <= max_len <= MAX_MAX_LEN`
/// - `nb_try <= MAX_NB_TRY`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SamplingOptions {
	/// Maximum number of characters in a generated name.
	max_len: usize,

	/// Number of extra attempts when the generated name is a training name.
	nb_try: usize,

	/// Seed of the random source; `None` uses the thread-local generator.
	pub seed: Option<u64>,
}

impl Default for SamplingOptions {
	fn default() -> Self {
		Self {
			max_len: DEFAULT_MAX_LEN,
			nb_try: 0,
			seed: None,
		}
	}
}

impl SamplingOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current length guard.
	pub fn max_len(&self) -> usize {
		self.max_len
	}

	/// Sets the length guard.
	///
	/// # Errors
	/// Returns `BigramError::InvalidInput` if `max_len` is 0 or above `MAX_MAX_LEN`.
	pub fn set_max_len(&mut self, max_len: usize) -> Result<()> {
		if !(1..=MAX_MAX_LEN).contains(&max_len) {
			return Err(BigramError::InvalidInput(format!("max_len must be in [1, {MAX_MAX_LEN}], got {max_len}")));
		}
		self.max_len = max_len;
		Ok(())
	}

	/// Builder-style variant of `set_max_len`.
	pub fn with_max_len(mut self, max_len: usize) -> Result<Self> {
		self.set_max_len(max_len)?;
		Ok(self)
	}

	pub fn nb_try(&self) -> usize {
		self.nb_try
	}

	/// Sets the number of extra attempts.
	///
	/// # Errors
	/// Returns `BigramError::InvalidInput` if `nb_try` is above `MAX_NB_TRY`.
	pub fn set_nb_try(&mut self, nb_try: usize) -> Result<()> {
		if nb_try > MAX_NB_TRY {
			return Err(BigramError::InvalidInput(format!("nb_try must be <= {MAX_NB_TRY}, got {nb_try}")));
		}
		self.nb_try = nb_try;
		Ok(())
	}

	/// Builder-style variant of `set_nb_try`.
	pub fn with_nb_try(mut self, nb_try: usize) -> Result<Self> {
		self.set_nb_try(nb_try)?;
		Ok(self)
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}
}
