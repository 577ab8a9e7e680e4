//! Trustless card shuffling and dealing (mental poker) without a trusted
//! dealer: a commutative elliptic-curve cipher, an extended-ElGamal cipher
//! with a universally-re-encryptable commutative mode, canonical deck
//! encodings, and a two-flavour dealer workflow built on top of both.

pub mod arith;
pub mod dealer;
pub mod deck;
pub mod ec;
pub mod eg;
