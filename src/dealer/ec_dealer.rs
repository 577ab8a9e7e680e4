//! EC-flavoured dealer: shuffle-and-lock with exactly one shuffle layer plus
//! one per-card key per participating party (spec.md §4.6, §4.7).

use super::error::DealerError;
use crate::deck::cards::{canonical_card_names, DECK_SIZE};
use crate::deck::ec_deck::{canonical_ec_deck, point_to_card_table};
use crate::ec::{self, EcKey};
use k256::ProjectivePoint;
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use std::collections::HashMap;

pub const DEFAULT_DECK_ID: &str = "temp";

pub struct EcDealer {
    shuffle_key: EcKey,
    decks: HashMap<String, Vec<EcKey>>,
    new_deck: Vec<ProjectivePoint>,
    point_to_card: HashMap<BigUint, &'static str>,
}

impl EcDealer {
    /// Generates the canonical deck, builds the point-to-card table, and
    /// adopts (or generates) a shuffle key.
    pub fn new<R: RngCore + CryptoRng>(shuffle_key: Option<EcKey>, rng: &mut R) -> Self {
        let new_deck = canonical_ec_deck(DECK_SIZE);
        let point_to_card = point_to_card_table(&new_deck);
        Self {
            shuffle_key: shuffle_key.unwrap_or_else(|| EcKey::generate(rng)),
            decks: HashMap::new(),
            new_deck,
            point_to_card,
        }
    }

    pub fn fresh_deck(&self) -> Vec<ProjectivePoint> {
        self.new_deck.clone()
    }

    pub fn card_names(&self) -> [&'static str; DECK_SIZE] {
        canonical_card_names()
    }

    /// Masks every card with the shuffle key and randomly permutes the
    /// result, producing a "shuffle-locked" deck. Refreshes the shuffle key
    /// by default — every call gets a fresh key unless `refresh_key` is
    /// `false` (the EC/EG asymmetry documented in spec.md §4.6).
    pub fn shuffle<R: RngCore + CryptoRng>(
        &mut self,
        deck: &[ProjectivePoint],
        refresh_key: bool,
        rng: &mut R,
    ) -> Vec<ProjectivePoint> {
        let _span = tracing::debug_span!(target: "mental_poker::dealer::ec", "shuffle").entered();
        if refresh_key {
            self.shuffle_key = EcKey::generate(rng);
        }
        let mut encrypted: Vec<ProjectivePoint> =
            deck.iter().map(|card| self.shuffle_key.mask(card)).collect();
        crate::arith::shuffle_in_place(rng, &mut encrypted);
        encrypted
    }

    /// Removes this dealer's shuffle lock (if present), generates a fresh
    /// per-card key for every position, and masks each position with its
    /// own key — a "deal-locked" deck. The per-card keys are stored under
    /// `deck_id` for later release via [`EcDealer::get_card_key`].
    pub fn deal<R: RngCore + CryptoRng>(
        &mut self,
        deck: &[ProjectivePoint],
        shuffle_locked: bool,
        deck_id: impl Into<String>,
        rng: &mut R,
    ) -> Result<Vec<ProjectivePoint>, DealerError> {
        let _span = tracing::debug_span!(target: "mental_poker::dealer::ec", "deal").entered();
        let unlocked: Vec<ProjectivePoint> = if shuffle_locked {
            deck.iter()
                .map(|card| self.shuffle_key.unmask(card))
                .collect::<Result<_, _>>()?
        } else {
            deck.to_vec()
        };

        let keys: Vec<EcKey> = (0..unlocked.len()).map(|_| EcKey::generate(rng)).collect();
        let dealt: Vec<ProjectivePoint> = unlocked
            .iter()
            .zip(keys.iter())
            .map(|(card, key)| key.mask(card))
            .collect();

        self.decks.insert(deck_id.into(), keys);
        Ok(dealt)
    }

    /// Applies `unmask` in the given key order and looks up the resulting
    /// point's x-coordinate in the canonical table.
    pub fn reveal_card(
        &self,
        card: &ProjectivePoint,
        keys: &[&EcKey],
    ) -> Result<&'static str, DealerError> {
        let mut point = *card;
        for key in keys {
            point = key.unmask(&point)?;
        }
        self.point_to_card
            .get(&ec::point_x(&point))
            .copied()
            .ok_or(DealerError::UnknownCardEncoding)
    }

    pub fn get_card_key(&self, index: usize, deck_id: &str) -> Result<&EcKey, DealerError> {
        let keys = self.get_deck_keys(deck_id)?;
        keys.get(index).ok_or_else(|| DealerError::CardIndexOutOfRange {
            index,
            deck_id: deck_id.to_string(),
            len: keys.len(),
        })
    }

    pub fn get_deck_keys(&self, deck_id: &str) -> Result<&[EcKey], DealerError> {
        self.decks
            .get(deck_id)
            .map(Vec::as_slice)
            .ok_or_else(|| DealerError::UnknownDeck(deck_id.to_string()))
    }
}
