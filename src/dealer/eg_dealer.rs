//! EG-flavoured dealer: shuffle and deal via the commutative cipher
//! (spec.md §4.6, §4.7). Unlike the EC dealer, `shuffle` preserves the
//! shuffle key across calls by default, because EG shuffles commute
//! layer-wise and every participating party must be able to peel its own
//! layer back out later.

use super::error::DealerError;
use crate::deck::cards::{canonical_card_names, DECK_SIZE};
use crate::deck::eg_deck::{canonical_eg_deck, int_to_card_table};
use crate::eg::{CommutativeMessage, CommutativeValue, EgPrivateKey, PublicParams};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use std::collections::HashMap;

pub const DEFAULT_DECK_ID: &str = "temp";

pub struct EgDealer {
    shuffle_key: EgPrivateKey,
    decks: HashMap<String, Vec<EgPrivateKey>>,
    new_deck: Vec<BigUint>,
    int_to_card: HashMap<BigUint, &'static str>,
    params: PublicParams,
}

impl EgDealer {
    pub fn new<R: RngCore + CryptoRng>(
        shuffle_key: Option<EgPrivateKey>,
        params: Option<PublicParams>,
        rng: &mut R,
    ) -> Self {
        let params = params.unwrap_or_else(PublicParams::default_params);
        let new_deck = canonical_eg_deck(&params, DECK_SIZE, rng);
        let int_to_card = int_to_card_table(&new_deck);
        Self {
            shuffle_key: shuffle_key.unwrap_or_else(|| EgPrivateKey::generate(&params, rng)),
            decks: HashMap::new(),
            new_deck,
            int_to_card,
            params,
        }
    }

    pub fn fresh_deck(&self) -> Vec<CommutativeMessage> {
        self.new_deck
            .iter()
            .cloned()
            .map(CommutativeMessage::Plaintext)
            .collect()
    }

    pub fn card_names(&self) -> [&'static str; DECK_SIZE] {
        canonical_card_names()
    }

    /// Commutatively encrypts every card with the shuffle key and randomly
    /// permutes the result. Preserves the shuffle key across calls unless
    /// `refresh_key` is `true`.
    pub fn shuffle<R: RngCore + CryptoRng>(
        &mut self,
        deck: &[CommutativeMessage],
        refresh_key: bool,
        rng: &mut R,
    ) -> Result<Vec<CommutativeMessage>, DealerError> {
        let _span = tracing::debug_span!(target: "mental_poker::dealer::eg", "shuffle").entered();
        if refresh_key {
            self.shuffle_key = EgPrivateKey::generate(&self.params, rng);
        }
        let mut encrypted: Vec<CommutativeMessage> = deck
            .iter()
            .map(|card| {
                self.shuffle_key
                    .commutative_encrypt(card, rng)
                    .map(CommutativeMessage::Ciphertext)
            })
            .collect::<Result<_, _>>()?;
        crate::arith::shuffle_in_place(rng, &mut encrypted);
        Ok(encrypted)
    }

    /// Peels this dealer's own shuffle layer from a single card, if present.
    /// Exposed so a party whose shuffle layer is not outermost can strip it
    /// ahead of the party that deals next (spec.md §9).
    pub fn remove_shuffle_lock<R: RngCore + CryptoRng>(
        &self,
        card: CommutativeMessage,
        rng: &mut R,
    ) -> Result<CommutativeMessage, DealerError> {
        match card {
            CommutativeMessage::Plaintext(_) => Ok(card),
            CommutativeMessage::Ciphertext(set) => Ok(self
                .shuffle_key
                .commutative_decrypt(set, rng)?
                .into()),
        }
    }

    /// Removes this dealer's shuffle lock (if `shuffle_locked`), then
    /// commutatively encrypts every remaining element with a fresh per-card
    /// key, stored under `deck_id`.
    pub fn deal<R: RngCore + CryptoRng>(
        &mut self,
        deck: &[CommutativeMessage],
        shuffle_locked: bool,
        deck_id: impl Into<String>,
        rng: &mut R,
    ) -> Result<Vec<CommutativeMessage>, DealerError> {
        let _span = tracing::debug_span!(target: "mental_poker::dealer::eg", "deal").entered();
        let unlocked: Vec<CommutativeMessage> = if shuffle_locked {
            deck.iter()
                .cloned()
                .map(|card| self.remove_shuffle_lock(card, rng))
                .collect::<Result<_, _>>()?
        } else {
            deck.to_vec()
        };

        let keys: Vec<EgPrivateKey> = (0..unlocked.len())
            .map(|_| EgPrivateKey::generate(&self.params, rng))
            .collect();

        let dealt: Vec<CommutativeMessage> = unlocked
            .iter()
            .zip(keys.iter())
            .map(|(card, key)| {
                key.commutative_encrypt(card, rng)
                    .map(CommutativeMessage::Ciphertext)
            })
            .collect::<Result<_, _>>()?;

        self.decks.insert(deck_id.into(), keys);
        Ok(dealt)
    }

    /// Peels layers with `commutative_decrypt` using the supplied keys, in
    /// order, until an integer drops out, and looks it up in the canonical
    /// table. Fails with [`DealerError::IncompleteDecryption`] if keys run
    /// out while a ciphertext remains.
    pub fn reveal_card<R: RngCore + CryptoRng>(
        &self,
        card: CommutativeMessage,
        keys: &[&EgPrivateKey],
        rng: &mut R,
    ) -> Result<&'static str, DealerError> {
        let mut value = card;
        for key in keys {
            value = match value {
                CommutativeMessage::Plaintext(_) => break,
                CommutativeMessage::Ciphertext(set) => {
                    let peeled: CommutativeValue = key.commutative_decrypt(set, rng)?;
                    peeled.into()
                }
            };
        }

        match value {
            CommutativeMessage::Plaintext(v) => self
                .int_to_card
                .get(&v)
                .copied()
                .ok_or(DealerError::UnknownCardEncoding),
            CommutativeMessage::Ciphertext(_) => Err(DealerError::IncompleteDecryption),
        }
    }

    pub fn get_card_key(&self, index: usize, deck_id: &str) -> Result<&EgPrivateKey, DealerError> {
        let keys = self.get_deck_keys(deck_id)?;
        keys.get(index).ok_or_else(|| DealerError::CardIndexOutOfRange {
            index,
            deck_id: deck_id.to_string(),
            len: keys.len(),
        })
    }

    pub fn get_deck_keys(&self, deck_id: &str) -> Result<&[EgPrivateKey], DealerError> {
        self.decks
            .get(deck_id)
            .map(Vec::as_slice)
            .ok_or_else(|| DealerError::UnknownDeck(deck_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(13)
    }

    /// S3: single-party sanity — shuffle then deal, reveal every position.
    #[test]
    fn single_party_reveals_all_52_cards() {
        let mut r = rng();
        let mut dealer = EgDealer::new(None, None, &mut r);
        let fresh = dealer.fresh_deck();
        let shuffled = dealer.shuffle(&fresh, false, &mut r).unwrap();
        let dealt = dealer.deal(&shuffled, true, DEFAULT_DECK_ID, &mut r).unwrap();

        let mut revealed = HashSet::new();
        for (i, card) in dealt.into_iter().enumerate() {
            let key = dealer.get_card_key(i, DEFAULT_DECK_ID).unwrap();
            let name = dealer.reveal_card(card, &[key], &mut r).unwrap();
            revealed.insert(name);
        }
        assert_eq!(revealed.len(), DECK_SIZE);
    }

    /// S4: two-party commutativity — reveal order must not affect the card.
    #[test]
    fn two_party_reveal_is_order_independent() {
        let mut r = rng();
        let mut alice = EgDealer::new(None, None, &mut r);
        let mut bob = EgDealer::new(None, Some(alice.params.clone()), &mut r);

        let fresh = alice.fresh_deck();
        let after_alice_shuffle = alice.shuffle(&fresh, false, &mut r).unwrap();
        let after_bob_shuffle = bob.shuffle(&after_alice_shuffle, false, &mut r).unwrap();

        // Bob removes his own shuffle lock before Alice deals, matching the
        // state machine note in spec.md §9 (each party peels its own layer
        // between shuffles and the first deal).
        let bob_unlocked: Vec<CommutativeMessage> = after_bob_shuffle
            .iter()
            .cloned()
            .map(|c| bob.remove_shuffle_lock(c, &mut r).unwrap())
            .collect();

        let after_alice_deal = alice
            .deal(&bob_unlocked, true, DEFAULT_DECK_ID, &mut r)
            .unwrap();
        let after_bob_deal = bob
            .deal(&after_alice_deal, false, DEFAULT_DECK_ID, &mut r)
            .unwrap();

        let alice_key = alice.get_card_key(0, DEFAULT_DECK_ID).unwrap();
        let bob_key = bob.get_card_key(0, DEFAULT_DECK_ID).unwrap();

        let mut r1 = StdRng::seed_from_u64(200);
        let order_ab = alice
            .reveal_card(after_bob_deal[0].clone(), &[alice_key, bob_key], &mut r1)
            .unwrap();

        let mut r2 = StdRng::seed_from_u64(201);
        let order_ba = alice
            .reveal_card(after_bob_deal[0].clone(), &[bob_key, alice_key], &mut r2)
            .unwrap();

        assert_eq!(order_ab, order_ba);
    }
}
