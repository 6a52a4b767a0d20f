/// What a search produced, and whether it covered everything it was asked to.
///
/// Shared by the seed-range and state-inversion searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T> {
	pub found: Vec<T>,
	pub searched: u64,
	pub cancelled: bool,
}

impl<T> SearchOutcome<T> {
	/// False when the search stopped early on cancellation.
	pub fn is_complete(&self) -> bool {
		!self.cancelled
	}
}
