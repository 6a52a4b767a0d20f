use crate::cipher::CipherOracle;
use crate::lcg::Lcg;

/// Draws `length` outputs from `lcg`, keeping the low byte of each.
///
/// Must be called right after seeding to reproduce a key generated with
/// `srand(seed)` followed by `length` calls to `rand() % 0x100`.
pub fn derive_key(lcg: &mut Lcg, length: usize) -> Vec<u8> {
	(0..length).map(|_| (lcg.next() % 0x100) as u8).collect()
}

/// Derives a key sized for the oracle `C`.
pub fn derive_cipher_key<C: CipherOracle>(lcg: &mut Lcg) -> Vec<u8> {
	derive_key(lcg, C::KEY_SIZE)
}

/// Key a victim gets from `srand(seed)`.
pub fn key_for_seed<C: CipherOracle>(seed: u32) -> Vec<u8> {
	derive_cipher_key::<C>(&mut Lcg::new(seed))
}

/// Predicts the next `count` keys drawn from a generator whose internal state
/// is known to be `state`.
pub fn predict_keys(state: u32, key_len: usize, count: usize) -> Vec<Vec<u8>> {
	let mut lcg = Lcg::new(state);
	(0..count).map(|_| derive_key(&mut lcg, key_len)).collect()
}
