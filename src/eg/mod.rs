//! Extended ElGamal cryptosystem: classical encrypt/decrypt (`basic`) plus
//! the commutative, universally-re-encryptable mode (`commutative`) that
//! backs the EG dealer's shuffle/deal/reveal workflow.

pub mod basic;
pub mod commutative;
pub mod error;
pub mod params;

pub use basic::{Ciphertext, EgPrivateKey, EgPublicKey};
pub use commutative::{CommutativeMessage, CommutativeSet, CommutativeValue, Element, Pair};
pub use error::EgError;
pub use params::PublicParams;
