use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a search and its operator.
///
/// Searches poll it once per chunk, so a cancelled search stops within one
/// chunk of work.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
	cancelled: Arc<AtomicBool>,
}

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Release);
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Acquire)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clones_share_flag() {
		let token = CancelToken::new();
		let other = token.clone();
		assert!(!other.is_cancelled());
		token.cancel();
		assert!(other.is_cancelled());
	}
}
