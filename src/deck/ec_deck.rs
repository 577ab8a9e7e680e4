//! EC deck encoding: the canonical deck is `[1*G, 2*G, ..., 52*G]`, mapped to
//! card names through the x-coordinate of each point (spec.md §3, §4.5).

use super::cards::{canonical_card_names, DECK_SIZE};
use crate::ec;
use k256::{ProjectivePoint, Scalar};
use num_bigint::BigUint;
use std::collections::HashMap;

/// The first `n` non-zero multiples of the curve generator.
pub fn canonical_ec_deck(n: usize) -> Vec<ProjectivePoint> {
    let generator = ec::generator();
    (1..=n as u64)
        .map(|i| generator * Scalar::from(i))
        .collect()
}

/// Bijection from a point's x-coordinate to its card name, built from
/// `points` (in canonical order) zipped against [`canonical_card_names`].
pub fn point_to_card_table(
    points: &[ProjectivePoint],
) -> HashMap<BigUint, &'static str> {
    let names = canonical_card_names();
    points
        .iter()
        .zip(names.iter())
        .map(|(point, name)| (ec::point_x(point), *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_is_a_bijection_onto_card_names() {
        let points = canonical_ec_deck(DECK_SIZE);
        let table = point_to_card_table(&points);
        assert_eq!(table.len(), DECK_SIZE);

        let mut names: Vec<&str> = table.values().copied().collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DECK_SIZE);
    }
}
