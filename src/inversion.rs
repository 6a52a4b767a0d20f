//! Recovers a full generator state from two consecutive outputs.
//!
//! An output `p1` fixes bits 16..30 of the state that produced it. Assuming
//! bit 31 is clear, that state is `p1 * 65536 + i` for some `i < 65536`, and
//! only the guesses whose next output equals `p2` survive.
//!
//! Bit 31 never reaches an output, so when the assumption is wrong the search
//! still finds the state with that bit cleared, and it predicts the same
//! stream. An empty result means `p1` and `p2` were not consecutive outputs.
//! `scale_factor` widens the range of `i` past 65536 to probe neighbouring
//! high bits.

use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::config::InversionConfig;
use crate::error::ConfigError;
use crate::lcg::{Lcg, HIDDEN_BITS};
use crate::progress::{NoProgress, ProgressSink, Throttle};
use crate::outcome::SearchOutcome;

pub const CHUNK_SIZE: u64 = 1 << 14;

#[derive(Debug, Clone, Copy)]
pub struct StateInversion {
	config: InversionConfig,
}

impl StateInversion {
	pub fn new(config: InversionConfig) -> Result<Self, ConfigError> {
		Ok(Self { config: config.validate()? })
	}

	/// Draws two outputs from `lcg` and prepares a search for the state it
	/// held after the first one.
	pub fn from_lcg(lcg: &mut Lcg, scale_factor: u32, max_candidates: u32) -> Result<Self, ConfigError> {
		let p1 = lcg.next();
		let p2 = lcg.next();
		Self::new(InversionConfig { p1, p2, scale_factor, max_candidates })
	}

	pub fn config(&self) -> &InversionConfig {
		&self.config
	}

	/// Full state for low-bit guess `i`, reduced to 32 bits like any seed.
	pub fn candidate(&self, i: u64) -> u32 {
		(((self.config.p1 as u64) << HIDDEN_BITS) + i) as u32
	}

	pub fn is_consistent(&self, state: u32) -> bool {
		Lcg::new(state).next() == self.config.p2
	}

	/// Candidate states in ascending guess order, at most `max_candidates`.
	pub fn run(&self) -> Vec<u32> {
		self.run_with(&NoProgress, &CancelToken::new()).found
	}

	pub fn run_with(&self, progress: &dyn ProgressSink, cancel: &CancelToken) -> SearchOutcome<u32> {
		let total = self.config.search_len();
		let max = self.config.max_candidates as usize;
		log::info!("inverting p1={} p2={} over {} guesses", self.config.p1, self.config.p2, total);

		let mut throttle = Throttle::new(progress, total);
		let mut found = Vec::new();
		let mut searched = 0;
		let mut cancelled = false;

		while searched < total && found.len() < max {
			if cancel.is_cancelled() {
				log::warn!("state inversion cancelled after {} of {} guesses", searched, total);
				cancelled = true;
				break;
			}
			let end = (searched + CHUNK_SIZE).min(total);
			let mut hits: Vec<(u64, u32)> = (searched..end)
				.into_par_iter()
				.map(|i| (i, self.candidate(i)))
				.filter(|&(_, state)| self.is_consistent(state))
				.collect();
			hits.sort_unstable_by_key(|&(i, _)| i);
			found.extend(hits.into_iter().map(|(_, state)| state));
			searched = end;
			throttle.advance(searched);
		}

		found.truncate(max);
		if found.is_empty() && !cancelled {
			log::info!("no state consistent with p1={} p2={}", self.config.p1, self.config.p2);
		} else {
			log::info!("state inversion finished: {} candidates", found.len());
		}
		SearchOutcome { found, searched, cancelled }
	}
}
