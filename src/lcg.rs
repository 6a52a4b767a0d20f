//! Portable `rand()` from ISO/IEC 9899:1990, with the state made explicit.
//!
//! Every call exposes only bits 16..31 of the 32-bit state (and drops bit 31
//! as well, since `RAND_MAX` is 32767), which is what makes the generator
//! invertible from a pair of outputs.

pub const MULTIPLIER: u32 = 1103515245;
pub const INCREMENT: u32 = 12345;
pub const RAND_MAX: u16 = 32767;

/// Number of low state bits hidden by each output.
pub const HIDDEN_BITS: u32 = 16;

/// The observable part of a generator state.
pub fn truncate(state: u32) -> u16 {
	((state >> HIDDEN_BITS) % (RAND_MAX as u32 + 1)) as u16
}

/// Applies one LCG transition.
pub fn step(state: u32) -> u32 {
	state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
	state: u32,
}

impl Lcg {
	pub fn new(seed: u32) -> Self {
		Self { state: seed }
	}

	/// Equivalent of `srand(seed)`.
	pub fn seed(&mut self, seed: u32) {
		self.state = seed;
	}

	/// Equivalent of `rand()`: advances the state, then returns its truncated view.
	pub fn next(&mut self) -> u16 {
		self.state = step(self.state);
		truncate(self.state)
	}

	pub fn state(&self) -> u32 {
		self.state
	}

	/// Endless output stream continuing from the current state.
	pub fn outputs(mut self) -> impl Iterator<Item = u16> {
		std::iter::from_fn(move || Some(self.next()))
	}
}

impl Default for Lcg {
	// C programs that never call srand() behave as if seeded with 1.
	fn default() -> Self {
		Self::new(1)
	}
}
