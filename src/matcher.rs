use crate::error::ConfigError;

/// The portion of the plaintext the attacker knows, anchored at offset 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownPrefix {
	bytes: Vec<u8>,
}

impl KnownPrefix {
	pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
		let bytes = bytes.into();
		if bytes.is_empty() {
			return Err(ConfigError::EmptyPrefix);
		}
		Ok(Self { bytes })
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn matches(&self, candidate: &[u8]) -> bool {
		matches(candidate, self)
	}
}

/// Compares the first `prefix.len()` bytes of `candidate` against the prefix.
/// Everything after the prefix is ignored.
pub fn matches(candidate: &[u8], prefix: &KnownPrefix) -> bool {
	candidate.get(..prefix.len()) == Some(prefix.as_bytes())
}
