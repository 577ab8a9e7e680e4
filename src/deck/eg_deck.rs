//! EG deck encoding: the first `n` integers `m >= 2` whose ElGamal
//! encryption's first component lies in the quadratic-residue subgroup of
//! `Z_P*` (spec.md §3, §4.5, §6). All plaintext encodings share the residue
//! class so the class itself cannot leak under the commutative scheme.

use super::cards::canonical_card_names;
use crate::eg::{EgPrivateKey, PublicParams};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use std::collections::HashMap;

/// The default residue deck for the RFC 5114 2048/224 parameters
/// (spec.md §6) — a precomputed shortcut so the default path never has to
/// run the search below.
pub const DEFAULT_RESIDUES: [u32; 52] = [
    2, 4, 5, 8, 9, 10, 11, 16, 17, 18, 20, 21, 22, 25, 29, 31, 32, 34, 36, 37, 39, 40, 41, 42, 44,
    45, 49, 50, 53, 55, 57, 58, 61, 62, 64, 67, 68, 69, 71, 72, 73, 74, 78, 79, 80, 81, 82, 83, 84,
    85, 88, 90,
];

/// `true` iff a fresh encryption of `m`'s first component lies in the
/// quadratic-residue subgroup: `c1^((P-1)/2) == 1 mod P`.
fn is_quadratic_residue_encoding<R: RngCore + CryptoRng>(
    key: &EgPrivateKey,
    m: &BigUint,
    params: &PublicParams,
    rng: &mut R,
) -> bool {
    let exponent = (&params.p - BigUint::from(1_u32)) / BigUint::from(2_u32);
    match key.encrypt(m, rng) {
        Ok((c1, _)) => c1.modpow(&exponent, &params.p) == BigUint::from(1_u32),
        Err(_) => false,
    }
}

/// Searches upward from `i = 2` for the first `n` integers whose encryption
/// lands in the quadratic-residue subgroup. Used whenever the caller supplies
/// non-default parameters; for the default parameters, [`canonical_eg_deck`]
/// returns [`DEFAULT_RESIDUES`] instead of running this search.
pub fn generate_residues_from_params<R: RngCore + CryptoRng>(
    params: &PublicParams,
    n: usize,
    rng: &mut R,
) -> Vec<BigUint> {
    let probe_key = EgPrivateKey::generate(params, rng);
    let mut residues = Vec::with_capacity(n);
    let mut i = BigUint::from(2_u32);
    while residues.len() < n {
        if is_quadratic_residue_encoding(&probe_key, &i, params, rng) {
            residues.push(i.clone());
        }
        i += BigUint::from(1_u32);
    }
    residues
}

/// The canonical `n`-element EG deck under `params`: the precomputed table
/// for the default parameters (`n <= 52`), otherwise a fresh residue search.
pub fn canonical_eg_deck<R: RngCore + CryptoRng>(
    params: &PublicParams,
    n: usize,
    rng: &mut R,
) -> Vec<BigUint> {
    if params.is_default() && n <= DEFAULT_RESIDUES.len() {
        DEFAULT_RESIDUES[..n].iter().map(|&v| BigUint::from(v)).collect()
    } else {
        generate_residues_from_params(params, n, rng)
    }
}

/// Bijection from residue integer to card name, built from `residues` (in
/// canonical order) zipped against [`canonical_card_names`].
pub fn int_to_card_table(residues: &[BigUint]) -> HashMap<BigUint, &'static str> {
    let names = canonical_card_names();
    residues
        .iter()
        .zip(names.iter())
        .map(|(residue, name)| (residue.clone(), *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_table_is_a_bijection_onto_card_names() {
        let params = PublicParams::default_params();
        let mut r = StdRng::seed_from_u64(3);
        let deck = canonical_eg_deck(&params, 52, &mut r);
        let table = int_to_card_table(&deck);
        assert_eq!(table.len(), 52);
    }

    #[test]
    fn default_residues_are_quadratic_residues() {
        let params = PublicParams::default_params();
        let mut r = StdRng::seed_from_u64(4);
        let probe_key = EgPrivateKey::generate(&params, &mut r);
        for value in DEFAULT_RESIDUES {
            assert!(is_quadratic_residue_encoding(
                &probe_key,
                &BigUint::from(value),
                &params,
                &mut r
            ));
        }
    }

    #[test]
    fn non_default_params_fall_back_to_search() {
        // A small toy prime group, distinct from the default, to exercise
        // the search path rather than the precomputed table.
        let params = PublicParams {
            p: BigUint::from(467_u32),
            g: BigUint::from(2_u32),
            q: BigUint::from(233_u32),
        };
        let mut r = StdRng::seed_from_u64(5);
        let deck = canonical_eg_deck(&params, 5, &mut r);
        assert_eq!(deck.len(), 5);
        let mut sorted = deck.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 5, "residues must be distinct");
    }
}
