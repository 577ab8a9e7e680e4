//! Leaf arithmetic helpers shared by the EC and extended-ElGamal ciphers:
//! modular inverse, cryptographically strong ranged sampling, an unbiased
//! shuffle, and product-reduction modulo a prime.

pub mod error;

pub use error::ArithError;

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// Extended Euclidean algorithm: returns `(gcd, x, y)` such that
/// `a*x + b*y = gcd`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let new_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, new_r);
        let new_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, new_s);
        let new_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, new_t);
    }

    (old_r, old_s, old_t)
}

/// Modular inverse of `a` modulo `m` via the extended GCD. Fails with
/// [`ArithError::NonInvertible`] when `gcd(a, m) != 1` — a programmer error,
/// not a condition callers should retry.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint, ArithError> {
    let a_signed = BigInt::from_biguint(Sign::Plus, a.clone());
    let m_signed = BigInt::from_biguint(Sign::Plus, m.clone());
    let (gcd, x, _y) = extended_gcd(&a_signed, &m_signed);

    if gcd != BigInt::one() && gcd != -BigInt::one() {
        return Err(ArithError::NonInvertible);
    }

    let m_big = m_signed.clone();
    let result = ((x % &m_big) + &m_big) % &m_big;
    Ok(result.to_biguint().expect("result reduced modulo a positive modulus is non-negative"))
}

/// Samples a cryptographically uniform integer in the half-open range
/// `[low, high)`.
pub fn sample_range<R: RngCore + CryptoRng>(
    rng: &mut R,
    low: &BigUint,
    high: &BigUint,
) -> Result<BigUint, ArithError> {
    if low >= high {
        return Err(ArithError::EmptyRange {
            low: low.to_string(),
            high: high.to_string(),
        });
    }
    Ok(rng.gen_biguint_range(low, high))
}

/// Unbiased Fisher-Yates shuffle in place, driven by a cryptographic RNG.
pub fn shuffle_in_place<T, R: RngCore + CryptoRng>(rng: &mut R, items: &mut [T]) {
    use rand::seq::SliceRandom;
    items.shuffle(rng);
}

/// Product of `vals` reduced modulo `modulus`.
pub fn product_mod(vals: &[BigUint], modulus: &BigUint) -> BigUint {
    vals.iter().fold(BigUint::one(), |acc, v| (acc * v) % modulus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xC0FFEE)
    }

    #[test]
    fn mod_inverse_round_trips() {
        let m = BigUint::from(2048_u32 * 2 + 1_u32); // any odd-ish modulus for the test
        let a = BigUint::from(17_u32);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!((&a * &inv) % &m, BigUint::one());
    }

    #[test]
    fn mod_inverse_rejects_non_coprime() {
        let m = BigUint::from(12_u32);
        let a = BigUint::from(4_u32); // gcd(4, 12) = 4
        assert_eq!(mod_inverse(&a, &m), Err(ArithError::NonInvertible));
    }

    #[test]
    fn sample_range_stays_in_bounds() {
        let mut r = rng();
        let low = BigUint::from(5_u32);
        let high = BigUint::from(9_u32);
        for _ in 0..200 {
            let v = sample_range(&mut r, &low, &high).unwrap();
            assert!(v >= low && v < high);
        }
    }

    #[test]
    fn sample_range_rejects_empty_range() {
        let mut r = rng();
        let low = BigUint::from(9_u32);
        let high = BigUint::from(9_u32);
        assert!(sample_range(&mut r, &low, &high).is_err());
    }

    #[test]
    fn shuffle_in_place_is_a_permutation() {
        let mut r = rng();
        let mut items: Vec<u32> = (0..52).collect();
        let original = items.clone();
        shuffle_in_place(&mut r, &mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn product_mod_matches_naive_multiplication() {
        let modulus = BigUint::from(97_u32);
        let vals = vec![BigUint::from(3_u32), BigUint::from(5_u32), BigUint::from(7_u32)];
        assert_eq!(product_mod(&vals, &modulus), BigUint::from(105_u32 % 97_u32));
    }
}
