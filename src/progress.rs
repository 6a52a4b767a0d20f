//! Progress side channel for long searches.

/// Receives the completed fraction of a search, in `[0, 1]`.
pub trait ProgressSink: Sync {
	fn report(&self, completed_fraction: f64);
}

impl<F: Fn(f64) + Sync> ProgressSink for F {
	fn report(&self, completed_fraction: f64) {
		self(completed_fraction)
	}
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
	fn report(&self, _: f64) {}
}

/// Writes progress to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
	fn report(&self, completed_fraction: f64) {
		log::info!("~{:.1}% completed", completed_fraction * 100.0);
	}
}

/// Forwards progress to a sink at most once per `1 / steps` of the work.
pub struct Throttle<'a> {
	sink: &'a dyn ProgressSink,
	total: u64,
	steps: u64,
	last_step: u64,
}

impl<'a> Throttle<'a> {
	pub const DEFAULT_STEPS: u64 = 1000;

	pub fn new(sink: &'a dyn ProgressSink, total: u64) -> Self {
		Self { sink, total, steps: Self::DEFAULT_STEPS, last_step: 0 }
	}

	pub fn advance(&mut self, done: u64) {
		if self.total == 0 {
			return;
		}
		let step = (done as u128 * self.steps as u128 / self.total as u128) as u64;
		if step > self.last_step {
			self.last_step = step;
			self.sink.report(done as f64 / self.total as f64);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	#[test]
	fn throttle_limits_reports() {
		let seen = Mutex::new(Vec::new());
		let sink = |f: f64| seen.lock().unwrap().push(f);
		let mut throttle = Throttle::new(&sink, 10_000);
		for done in 1..=10_000 {
			throttle.advance(done);
		}
		let seen = seen.into_inner().unwrap();
		assert_eq!(seen.len(), 1000);
		assert_eq!(seen.last().copied(), Some(1.0));
		assert!(seen.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn throttle_skips_small_advances() {
		let count = Mutex::new(0);
		let sink = |_: f64| *count.lock().unwrap() += 1;
		let mut throttle = Throttle::new(&sink, 1 << 31);
		throttle.advance(1000);
		throttle.advance(2000);
		assert_eq!(*count.lock().unwrap(), 0);
		throttle.advance(1 << 31);
		assert_eq!(*count.lock().unwrap(), 1);
	}
}
