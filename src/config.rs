//! Search configuration, validated before any trial runs.

use crate::cipher::CipherOracle;
use crate::error::ConfigError;
use crate::matcher::KnownPrefix;
use crate::seed_search::SeedRange;

pub const DEFAULT_SCALE_FACTOR: u32 = 1;
pub const DEFAULT_MAX_CANDIDATES: u32 = 256;

/// Largest exclusive range end that still only enumerates 32-bit seeds.
pub const SEED_SPACE_END: i64 = 1 << 32;

/// Range of a `rand()` value used as a seed: `[0, RAND_MAX + 1)` on platforms
/// where `RAND_MAX` is `2^31 - 1`.
pub const SECURE_SEED_END: i64 = 1 << 31;

/// Converts a user-supplied value into the generator's state domain.
pub fn seed_from_i64(name: &'static str, value: i64) -> Result<u32, ConfigError> {
	u32::try_from(value).map_err(|_| ConfigError::SeedOutOfDomain { name, value })
}

/// Validates `[start, end)` and turns it into an enumerable seed range.
pub fn seed_range(start: i64, end: i64) -> Result<SeedRange, ConfigError> {
	if end <= start {
		return Err(ConfigError::EmptyRange { start, end });
	}
	let first = seed_from_i64("start", start)?;
	if end > SEED_SPACE_END {
		return Err(ConfigError::SeedOutOfDomain { name: "end", value: end });
	}
	Ok(SeedRange::new(first, (end - start) as u64))
}

/// The range `[now - window, now + window]` of timestamps, written as the
/// half-open `[now - window, now + window + 1)`.
pub fn window_range(now: i64, window: i64) -> Result<(i64, i64), ConfigError> {
	let invalid = || ConfigError::InvalidWindow { now, window };
	if window < 0 {
		return Err(invalid());
	}
	let start = now.checked_sub(window).ok_or_else(invalid)?;
	let end = now.checked_add(window).and_then(|e| e.checked_add(1)).ok_or_else(invalid)?;
	Ok((start, end))
}

/// Inputs for the demonstration search: a ciphertext is built from
/// `plaintext` under the key for `fixed_seed`, then `[start, end)` is searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRangeConfig {
	pub start: i64,
	pub end: i64,
	pub known_prefix: Vec<u8>,
	pub plaintext: Vec<u8>,
	pub fixed_seed: i64,
}

/// A `SeedRangeConfig` that has passed validation.
#[derive(Debug, Clone)]
pub struct ValidSeedRange {
	pub range: SeedRange,
	pub prefix: KnownPrefix,
	pub plaintext: Vec<u8>,
	pub fixed_seed: u32,
}

impl SeedRangeConfig {
	pub fn validate<C: CipherOracle>(&self) -> Result<ValidSeedRange, ConfigError> {
		let range = seed_range(self.start, self.end)?;
		let fixed_seed = seed_from_i64("seed", self.fixed_seed)?;
		let prefix = KnownPrefix::new(self.known_prefix.clone())?;
		let plaintext_len = C::padded_len(self.plaintext.len());
		if prefix.len() > plaintext_len {
			return Err(ConfigError::PrefixTooLong { prefix: prefix.len(), plaintext: plaintext_len });
		}
		Ok(ValidSeedRange { range, prefix, plaintext: self.plaintext.clone(), fixed_seed })
	}
}

/// Inputs for recovering a generator state from two consecutive outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InversionConfig {
	pub p1: u16,
	pub p2: u16,
	pub scale_factor: u32,
	pub max_candidates: u32,
}

impl InversionConfig {
	pub fn new(p1: u16, p2: u16) -> Self {
		Self { p1, p2, ..Self::default() }
	}

	pub fn validate(&self) -> Result<Self, ConfigError> {
		for (name, value) in [("p1", self.p1), ("p2", self.p2)] {
			if value > crate::lcg::RAND_MAX {
				return Err(ConfigError::OutputOutOfRange { name, value: value as u32 });
			}
		}
		if self.scale_factor == 0 {
			return Err(ConfigError::InvalidScaleFactor);
		}
		if self.max_candidates == 0 {
			return Err(ConfigError::InvalidMaxCandidates);
		}
		Ok(*self)
	}

	/// Number of low-bit guesses tried.
	pub fn search_len(&self) -> u64 {
		(1u64 << crate::lcg::HIDDEN_BITS) * self.scale_factor as u64
	}
}

impl Default for InversionConfig {
	fn default() -> Self {
		Self { p1: 0, p2: 0, scale_factor: DEFAULT_SCALE_FACTOR, max_candidates: DEFAULT_MAX_CANDIDATES }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cipher::Aes128Ecb;

	fn config(start: i64, end: i64) -> SeedRangeConfig {
		SeedRangeConfig {
			start,
			end,
			known_prefix: b"this ".to_vec(),
			plaintext: b"this message starts with \"this \"!".to_vec(),
			fixed_seed: 1700000000,
		}
	}

	#[test]
	fn valid_range() {
		let valid = config(10, 20).validate::<Aes128Ecb>().unwrap();
		assert_eq!(valid.range.start(), 10);
		assert_eq!(valid.range.len(), 10);
		assert_eq!(valid.fixed_seed, 1700000000);
	}

	#[test]
	fn empty_or_inverted_range() {
		assert_eq!(config(5, 5).validate::<Aes128Ecb>().unwrap_err(), ConfigError::EmptyRange { start: 5, end: 5 });
		assert_eq!(config(6, 5).validate::<Aes128Ecb>().unwrap_err(), ConfigError::EmptyRange { start: 6, end: 5 });
	}

	#[test]
	fn bounds_outside_state_domain() {
		assert_eq!(
			config(-1, 5).validate::<Aes128Ecb>().unwrap_err(),
			ConfigError::SeedOutOfDomain { name: "start", value: -1 },
		);
		assert_eq!(
			config(0, SEED_SPACE_END + 1).validate::<Aes128Ecb>().unwrap_err(),
			ConfigError::SeedOutOfDomain { name: "end", value: SEED_SPACE_END + 1 },
		);
		let whole = config(0, SEED_SPACE_END).validate::<Aes128Ecb>().unwrap();
		assert_eq!(whole.range.len(), 1 << 32);

		let mut bad_seed = config(0, 10);
		bad_seed.fixed_seed = i64::MAX;
		assert!(matches!(bad_seed.validate::<Aes128Ecb>(), Err(ConfigError::SeedOutOfDomain { name: "seed", .. })));
	}

	#[test]
	fn window_around_timestamp() {
		assert_eq!(window_range(1700000000, 10), Ok((1699999990, 1700000011)));
		assert_eq!(window_range(1700000000, 0), Ok((1700000000, 1700000001)));
		let (start, end) = window_range(1700000000, 10).unwrap();
		assert_eq!(seed_range(start, end).unwrap().len(), 21);
	}

	#[test]
	fn window_overflow_rejected() {
		let now = 1700000000;
		assert_eq!(window_range(now, -1), Err(ConfigError::InvalidWindow { now, window: -1 }));
		assert_eq!(window_range(now, i64::MAX), Err(ConfigError::InvalidWindow { now, window: i64::MAX }));
		assert_eq!(
			window_range(now, 9223372036854775000),
			Err(ConfigError::InvalidWindow { now, window: 9223372036854775000 }),
		);
		assert_eq!(window_range(i64::MAX, 0), Err(ConfigError::InvalidWindow { now: i64::MAX, window: 0 }));
		// In range for i64 but not for 32-bit seeds: left to seed_range.
		let (start, end) = window_range(now, 1 << 40).unwrap();
		assert!(matches!(seed_range(start, end), Err(ConfigError::SeedOutOfDomain { name: "start", .. })));
	}

	#[test]
	fn prefix_longer_than_plaintext() {
		let mut cfg = config(0, 10);
		cfg.plaintext = b"short".to_vec();
		cfg.known_prefix = vec![b'x'; 17];
		assert_eq!(
			cfg.validate::<Aes128Ecb>().unwrap_err(),
			ConfigError::PrefixTooLong { prefix: 17, plaintext: 16 },
		);
	}

	#[test]
	fn inversion_defaults_and_validation() {
		let cfg = InversionConfig::new(3536, 17195);
		assert_eq!(cfg.scale_factor, 1);
		assert_eq!(cfg.max_candidates, 256);
		assert_eq!(cfg.search_len(), 65536);
		assert!(cfg.validate().is_ok());

		assert_eq!(InversionConfig::new(32768, 0).validate(), Err(ConfigError::OutputOutOfRange { name: "p1", value: 32768 }));
		assert_eq!(InversionConfig { scale_factor: 0, ..cfg }.validate(), Err(ConfigError::InvalidScaleFactor));
		assert_eq!(InversionConfig { max_candidates: 0, ..cfg }.validate(), Err(ConfigError::InvalidMaxCandidates));
	}
}
