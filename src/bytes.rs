use crate::error::ConfigError;

/// Owned byte buffer with the text encodings the tool reads and prints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bytes {
	bytes: Vec<u8>,
}

impl Bytes {
	pub fn from_vec(bytes: Vec<u8>) -> Self {
		Self { bytes }
	}

	pub fn from_hex(hstr: &str) -> Result<Self, ConfigError> {
		Ok(Self::from_vec(hex::decode(hstr.trim())?))
	}

	pub fn from_base64(estr: &str) -> Result<Self, ConfigError> {
		use base64::Engine;
		let stripped: String = estr.chars().filter(|c| !c.is_whitespace()).collect();
		Ok(Self::from_vec(base64::engine::general_purpose::STANDARD.decode(stripped)?))
	}

	/// Accepts either hex or base64, trying hex first.
	pub fn from_encoded(s: &str) -> Result<Self, ConfigError> {
		Self::from_hex(s).or_else(|hex_err| Self::from_base64(s).map_err(|_| hex_err))
	}

	pub fn from_str(s: &str) -> Self {
		Self::from_vec(s.to_owned().into_bytes())
	}

	pub fn to_hex(&self) -> String {
		hex::encode(&self.bytes)
	}

	pub fn to_base64(&self) -> String {
		use base64::Engine;
		base64::engine::general_purpose::STANDARD.encode(&self.bytes)
	}

	/// Lossy text view with trailing zero padding removed.
	pub fn to_text(&self) -> String {
		let end = self.bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
		String::from_utf8_lossy(&self.bytes[..end]).into_owned()
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.bytes
	}
}

impl AsRef<[u8]> for Bytes {
	fn as_ref(&self) -> &[u8] {
		&self.bytes
	}
}

impl From<Vec<u8>> for Bytes {
	fn from(bytes: Vec<u8>) -> Self {
		Self::from_vec(bytes)
	}
}

impl std::fmt::Display for Bytes {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_text())
	}
}
