//! Errors raised while validating a search before it starts.
//!
//! Nothing inside a running search can fail, so this is the only error type
//! the library exposes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	#[error("end of range ({end}) must be greater than start ({start})")]
	EmptyRange { start: i64, end: i64 },
	#[error("{name} = {value} does not fit the 32-bit generator state")]
	SeedOutOfDomain { name: &'static str, value: i64 },
	#[error("known prefix ({prefix} bytes) is longer than the plaintext ({plaintext} bytes)")]
	PrefixTooLong { prefix: usize, plaintext: usize },
	#[error("window of {window} seconds around {now} is not a valid range")]
	InvalidWindow { now: i64, window: i64 },
	#[error("known prefix must not be empty")]
	EmptyPrefix,
	#[error("scale factor must be at least 1")]
	InvalidScaleFactor,
	#[error("candidate limit must be at least 1")]
	InvalidMaxCandidates,
	#[error("{name} = {value} is not a possible generator output (max 32767)")]
	OutputOutOfRange { name: &'static str, value: u32 },
	#[error("ciphertext length {len} is not a multiple of the block size {block_size}")]
	UnalignedCiphertext { len: usize, block_size: usize },
	#[error("invalid hex: {0}")]
	Hex(#[from] hex::FromHexError),
	#[error("invalid base64: {0}")]
	Base64(#[from] base64::DecodeError),
}
