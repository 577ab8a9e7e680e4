//! End-to-end two-party shuffle/deal/reveal over the elliptic-curve cipher.

use anyhow::Result;
use mental_poker::dealer::ec_dealer::{EcDealer, DEFAULT_DECK_ID};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = StdRng::seed_from_u64(2024);

    println!("1. Generating fresh decks for Alice and Bob...");
    let mut alice = EcDealer::new(None, &mut rng);
    let mut bob = EcDealer::new(None, &mut rng);
    let fresh = alice.fresh_deck();

    println!("2. Alice shuffles, then Bob shuffles...");
    let after_alice = alice.shuffle(&fresh, true, &mut rng);
    let after_bob = bob.shuffle(&after_alice, true, &mut rng);

    println!("3. Alice deals, then Bob deals...");
    let after_alice_deal = alice.deal(&after_bob, true, DEFAULT_DECK_ID, &mut rng)?;
    let dealt = bob.deal(&after_alice_deal, true, DEFAULT_DECK_ID, &mut rng)?;

    println!("4. Both parties release their key for the first card...");
    let alice_key = alice.get_card_key(0, DEFAULT_DECK_ID)?;
    let bob_key = bob.get_card_key(0, DEFAULT_DECK_ID)?;
    let revealed = alice.reveal_card(&dealt[0], &[bob_key, alice_key])?;

    println!("5. Revealed card at position 0: {revealed}");
    Ok(())
}
