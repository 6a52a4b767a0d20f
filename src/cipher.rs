use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;

/// A block cipher used as a black box by the searches.
///
/// Inputs are zero-padded up to a whole number of blocks, so outputs are
/// always block aligned. Keys must be exactly `KEY_SIZE` bytes long;
/// implementations panic on any other length.
pub trait CipherOracle: Sync {
	const BLOCK_SIZE: usize;
	const KEY_SIZE: usize;

	fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Vec<u8>;
	fn decrypt(&self, ciphertext: &[u8], key: &[u8]) -> Vec<u8>;

	fn padded_len(len: usize) -> usize {
		len.div_ceil(Self::BLOCK_SIZE) * Self::BLOCK_SIZE
	}
}

/// AES-128 in ECB mode with zero padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes128Ecb;

impl Aes128Ecb {
	fn cipher(key: &[u8]) -> Aes128 {
		assert_eq!(key.len(), Self::KEY_SIZE, "AES-128 key must be {} bytes, got {}", Self::KEY_SIZE, key.len());
		Aes128::new(GenericArray::from_slice(key))
	}

	fn pad(data: &[u8]) -> Vec<u8> {
		let mut buf = data.to_vec();
		buf.resize(Self::padded_len(data.len()), 0);
		buf
	}
}

impl CipherOracle for Aes128Ecb {
	const BLOCK_SIZE: usize = 16;
	const KEY_SIZE: usize = 16;

	fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Vec<u8> {
		let cipher = Self::cipher(key);
		let mut buf = Self::pad(plaintext);
		for block in buf.chunks_exact_mut(Self::BLOCK_SIZE) {
			cipher.encrypt_block(GenericArray::from_mut_slice(block));
		}
		buf
	}

	fn decrypt(&self, ciphertext: &[u8], key: &[u8]) -> Vec<u8> {
		let cipher = Self::cipher(key);
		let mut buf = Self::pad(ciphertext);
		for block in buf.chunks_exact_mut(Self::BLOCK_SIZE) {
			cipher.decrypt_block(GenericArray::from_mut_slice(block));
		}
		buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn padded_len_rounds_up() {
		assert_eq!(Aes128Ecb::padded_len(0), 0);
		assert_eq!(Aes128Ecb::padded_len(1), 16);
		assert_eq!(Aes128Ecb::padded_len(16), 16);
		assert_eq!(Aes128Ecb::padded_len(33), 48);
	}

	#[test]
	fn known_answer() {
		// FIPS-197 appendix C.1
		let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
		let plaintext = hex::decode("00112233445566778899aabbccddeeff").unwrap();
		let ciphertext = Aes128Ecb.encrypt(&plaintext, &key);
		assert_eq!(hex::encode(&ciphertext), "69c4e0d86a7b0430d8cdb78070b4c55a");
		assert_eq!(Aes128Ecb.decrypt(&ciphertext, &key), plaintext);
	}

	#[test]
	#[should_panic(expected = "AES-128 key must be 16 bytes, got 15")]
	fn short_key_is_rejected() {
		Aes128Ecb.encrypt(b"abc", &[0u8; 15]);
	}

	#[test]
	#[should_panic(expected = "AES-128 key must be 16 bytes, got 32")]
	fn long_key_is_rejected() {
		Aes128Ecb.decrypt(&[0u8; 16], &[0u8; 32]);
	}

	#[test]
	fn short_input_is_zero_padded() {
		let key = [7u8; 16];
		let ciphertext = Aes128Ecb.encrypt(b"abc", &key);
		assert_eq!(ciphertext.len(), 16);
		let decrypted = Aes128Ecb.decrypt(&ciphertext, &key);
		assert_eq!(&decrypted[..3], b"abc");
		assert!(decrypted[3..].iter().all(|&b| b == 0));
	}
}
