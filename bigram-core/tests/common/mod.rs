#![allow(dead_code)]

use rand::RngCore;

/// Deterministic random source replaying a fixed list of raw values.
///
/// Raw `0` makes the sampler take the most likely candidate and
/// `u64::MAX` makes it take the least likely one.
pub struct SequenceRng {
	values: Vec<u64>,
	index: usize,
}

impl SequenceRng {
	pub fn new(values: &[u64]) -> Self {
		assert!(!values.is_empty());
		Self { values: values.to_vec(), index: 0 }
	}

	/// Always draws `0.0`: every step follows the most likely branch.
	pub fn zero() -> Self {
		Self::new(&[0])
	}
}

impl RngCore for SequenceRng {
	fn next_u32(&mut self) -> u32 {
		self.next_u64() as u32
	}

	fn next_u64(&mut self) -> u64 {
		let value = self.values[self.index % self.values.len()];
		self.index += 1;
		value
	}

	fn fill_bytes(&mut self, dst: &mut [u8]) {
		for chunk in dst.chunks_mut(8) {
			let bytes = self.next_u64().to_le_bytes();
			chunk.copy_from_slice(&bytes[..chunk.len()]);
		}
	}
}
