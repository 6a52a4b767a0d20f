//! Brute force over a bounded seed space using a known plaintext prefix.

use rayon::prelude::*;

use crate::bytes::Bytes;
use crate::cancel::CancelToken;
use crate::cipher::CipherOracle;
use crate::config::ValidSeedRange;
use crate::error::ConfigError;
use crate::key::{derive_cipher_key, key_for_seed};
use crate::lcg::Lcg;
use crate::matcher::KnownPrefix;
use crate::outcome::SearchOutcome;
use crate::progress::{NoProgress, ProgressSink, Throttle};

pub const DEFAULT_CHUNK_SIZE: u64 = 1 << 16;

/// A seed whose key decrypts the ciphertext to something starting with the
/// known prefix. `plaintext` is the whole decrypted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
	pub seed: u32,
	pub plaintext: Bytes,
}

/// The half-open seed interval `[start, start + len)`, never past `2^32`.
///
/// Iterating is lazy and can be repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRange {
	start: u32,
	len: u64,
}

impl SeedRange {
	pub fn new(start: u32, len: u64) -> Self {
		let room = (1u64 << 32) - start as u64;
		Self { start, len: len.min(room) }
	}

	pub fn start(&self) -> u32 {
		self.start
	}

	/// Exclusive end, which may be `2^32`.
	pub fn end(&self) -> u64 {
		self.start as u64 + self.len
	}

	pub fn len(&self) -> u64 {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn iter(&self) -> impl Iterator<Item = u32> {
		(self.start as u64..self.end()).map(|s| s as u32)
	}

	/// Splits the range into consecutive pieces of at most `size` seeds.
	pub fn chunks(&self, size: u64) -> impl Iterator<Item = SeedRange> {
		let size = size.max(1);
		let end = self.end();
		(self.start as u64..end)
			.step_by(size as usize)
			.map(move |s| SeedRange::new(s as u32, size.min(end - s)))
	}
}

impl IntoIterator for SeedRange {
	type Item = u32;
	type IntoIter = Box<dyn Iterator<Item = u32>>;

	fn into_iter(self) -> Self::IntoIter {
		Box::new(self.iter())
	}
}

/// Encrypts `plaintext` under the key a victim derives from `srand(seed)`.
pub fn encrypt_with_seed<C: CipherOracle>(oracle: &C, plaintext: &[u8], seed: u32) -> Vec<u8> {
	oracle.encrypt(plaintext, &key_for_seed::<C>(seed))
}

pub struct SeedRangeSearch<C: CipherOracle> {
	oracle: C,
	ciphertext: Vec<u8>,
	prefix: KnownPrefix,
	chunk_size: u64,
}

impl<C: CipherOracle> SeedRangeSearch<C> {
	pub fn new(oracle: C, ciphertext: Vec<u8>, prefix: KnownPrefix) -> Result<Self, ConfigError> {
		if ciphertext.len() % C::BLOCK_SIZE != 0 {
			return Err(ConfigError::UnalignedCiphertext { len: ciphertext.len(), block_size: C::BLOCK_SIZE });
		}
		if prefix.len() > ciphertext.len() {
			return Err(ConfigError::PrefixTooLong { prefix: prefix.len(), plaintext: ciphertext.len() });
		}
		Ok(Self { oracle, ciphertext, prefix, chunk_size: DEFAULT_CHUNK_SIZE })
	}

	/// Builds the ciphertext from the configured plaintext and fixed seed.
	pub fn from_config(oracle: C, config: &ValidSeedRange) -> Result<Self, ConfigError> {
		let ciphertext = encrypt_with_seed(&oracle, &config.plaintext, config.fixed_seed);
		Self::new(oracle, ciphertext, config.prefix.clone())
	}

	pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
		self.chunk_size = chunk_size.max(1);
		self
	}

	pub fn ciphertext(&self) -> &[u8] {
		&self.ciphertext
	}

	/// Runs a single trial. Every buffer is created here, so trials cannot
	/// see each other's data.
	pub fn try_seed(&self, seed: u32) -> Option<MatchRecord> {
		let key = derive_cipher_key::<C>(&mut Lcg::new(seed));
		let plaintext = self.oracle.decrypt(&self.ciphertext, &key);
		self.prefix.matches(&plaintext).then(|| MatchRecord { seed, plaintext: plaintext.into() })
	}

	/// Searches the whole range and returns every match in ascending seed order.
	pub fn run(&self, range: SeedRange) -> Vec<MatchRecord> {
		self.run_with(range, &NoProgress, &CancelToken::new()).found
	}

	pub fn run_with(&self, range: SeedRange, progress: &dyn ProgressSink, cancel: &CancelToken) -> SearchOutcome<MatchRecord> {
		log::info!("searching {} seeds in [{}, {})", range.len(), range.start(), range.end());
		let mut throttle = Throttle::new(progress, range.len());
		let mut found = Vec::new();
		let mut searched = 0;
		let mut cancelled = false;

		for chunk in range.chunks(self.chunk_size) {
			if cancel.is_cancelled() {
				log::warn!("seed search cancelled after {} of {} seeds", searched, range.len());
				cancelled = true;
				break;
			}
			let hits: Vec<MatchRecord> = (chunk.start() as u64..chunk.end())
				.into_par_iter()
				.filter_map(|seed| self.try_seed(seed as u32))
				.collect();
			log::debug!("chunk [{}, {}): {} matches", chunk.start(), chunk.end(), hits.len());
			found.extend(hits);
			searched += chunk.len();
			throttle.advance(searched);
		}

		found.sort_by_key(|m| m.seed);
		log::info!("seed search finished: {} possible matches", found.len());
		SearchOutcome { found, searched, cancelled }
	}
}
