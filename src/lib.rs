//! Key recovery for ciphers keyed from the portable C `rand()`.
//!
//! Two attacks are provided. [`SeedRangeSearch`] brute-forces a bounded seed
//! space (typically timestamps) against a known plaintext prefix.
//! [`StateInversion`] rebuilds the generator state from two consecutive
//! outputs, after which every future key can be predicted with
//! [`predict_keys`].

pub mod bytes;
pub mod cancel;
pub mod cipher;
pub mod config;
pub mod error;
pub mod inversion;
pub mod key;
pub mod lcg;
pub mod matcher;
pub mod outcome;
pub mod progress;
pub mod seed_search;

pub use bytes::Bytes;
pub use cancel::CancelToken;
pub use cipher::{Aes128Ecb, CipherOracle};
pub use config::{InversionConfig, SeedRangeConfig, ValidSeedRange};
pub use error::ConfigError;
pub use inversion::StateInversion;
pub use key::{derive_cipher_key, derive_key, key_for_seed, predict_keys};
pub use lcg::Lcg;
pub use matcher::{matches, KnownPrefix};
pub use outcome::SearchOutcome;
pub use progress::{LogProgress, NoProgress, ProgressSink};
pub use seed_search::{encrypt_with_seed, MatchRecord, SeedRange, SeedRangeSearch};
