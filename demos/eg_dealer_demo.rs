//! End-to-end two-party shuffle/deal/reveal over the commutative
//! extended-ElGamal cipher.

use anyhow::Result;
use mental_poker::dealer::eg_dealer::{EgDealer, DEFAULT_DECK_ID};
use mental_poker::eg::PublicParams;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = StdRng::seed_from_u64(4091);
    let params = PublicParams::default_params();

    println!("1. Generating fresh decks for Alice and Bob...");
    let mut alice = EgDealer::new(None, Some(params.clone()), &mut rng);
    let mut bob = EgDealer::new(None, Some(params), &mut rng);
    let fresh = alice.fresh_deck();

    println!("2. Alice shuffles (fresh key), then Bob shuffles (fresh key)...");
    let after_alice = alice.shuffle(&fresh, true, &mut rng)?;
    let after_bob = bob.shuffle(&after_alice, true, &mut rng)?;

    println!("3. Bob strips his own (outermost) shuffle layer...");
    let bob_unlocked: Vec<_> = after_bob
        .iter()
        .cloned()
        .map(|card| bob.remove_shuffle_lock(card, &mut rng))
        .collect::<Result<_, _>>()?;

    println!("4. Alice deals, peeling her own shuffle lock...");
    let after_alice_deal = alice.deal(&bob_unlocked, true, DEFAULT_DECK_ID, &mut rng)?;
    println!("5. Bob deals (no shuffle lock left to peel)...");
    let dealt = bob.deal(&after_alice_deal, false, DEFAULT_DECK_ID, &mut rng)?;

    println!("6. Both parties release their key for the first card...");
    let alice_key = alice.get_card_key(0, DEFAULT_DECK_ID)?;
    let bob_key = bob.get_card_key(0, DEFAULT_DECK_ID)?;
    let revealed = alice.reveal_card(dealt[0].clone(), &[bob_key, alice_key], &mut rng)?;

    println!("7. Revealed card at position 0: {revealed}");
    Ok(())
}
