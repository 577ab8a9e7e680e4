//! Canonical deck generation and the card-name bijection (spec.md §4.5):
//! points on the curve for the EC cipher, quadratic residues mod `P` for the
//! extended-ElGamal cipher.

pub mod cards;
pub mod ec_deck;
pub mod eg_deck;

pub use cards::{canonical_card_names, DECK_SIZE};
