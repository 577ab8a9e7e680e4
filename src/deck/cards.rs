//! Canonical 52-card ordering and naming (spec.md §6): for each suit in the
//! order clubs, diamonds, hearts, spades, the ranks Ace, 2..9, T, J, Q, K.
//! Two-character names: rank letter followed by suit letter. This ordering
//! fixes the bijection with the encoded deck — it is part of the interface.

pub const DECK_SIZE: usize = 52;

const SUITS: [char; 4] = ['c', 'd', 'h', 's'];
const RANKS: [char; 13] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

/// Builds the 52 canonical card names in index order: `["Ac", "2c", ...,
/// "Kc", "Ad", ..., "Ks"]`.
pub fn canonical_card_names() -> [&'static str; DECK_SIZE] {
    static NAMES: once_cell::sync::Lazy<[&'static str; DECK_SIZE]> = once_cell::sync::Lazy::new(|| {
        let mut names: Vec<&'static str> = Vec::with_capacity(DECK_SIZE);
        for suit in SUITS {
            for rank in RANKS {
                let owned: String = [rank, suit].iter().collect();
                names.push(Box::leak(owned.into_boxed_str()));
            }
        }
        names.try_into().expect("exactly 52 card names")
    });
    *NAMES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_spec() {
        let names = canonical_card_names();
        assert_eq!(names[0], "Ac");
        assert_eq!(names[12], "Kc");
        assert_eq!(names[13], "Ad");
        assert_eq!(names[51], "Ks");
        assert_eq!(names.len(), DECK_SIZE);
    }

    #[test]
    fn all_names_are_distinct() {
        let names = canonical_card_names();
        let mut sorted = names.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), DECK_SIZE);
    }
}
