//! Classical ElGamal encryption over `Z_P*`: key generation, encrypt,
//! decrypt (spec.md §4.3).

use super::error::EgError;
use super::params::PublicParams;
use crate::arith;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

/// `(c1, c2) = (G^k, beta^k * m mod P)` for a fresh per-encryption `k`.
pub type Ciphertext = (BigUint, BigUint);

/// Public key `beta = G^alpha mod P` plus the parameters it was derived
/// under. Can encrypt but not decrypt.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EgPublicKey {
    pub beta: BigUint,
    pub params: PublicParams,
}

impl EgPublicKey {
    /// Encrypts an integer message `m` in `[1, P)`. Samples a fresh `k`.
    pub fn encrypt<R: RngCore + CryptoRng>(
        &self,
        message: &BigUint,
        rng: &mut R,
    ) -> Result<Ciphertext, EgError> {
        if message.is_zero() || *message >= self.params.p {
            return Err(EgError::InvalidMessage(message.to_string()));
        }
        let k = arith::sample_range(rng, &BigUint::one(), &self.params.q)
            .expect("q > 1 for any valid public parameter set");
        let c1 = self.params.g.modpow(&k, &self.params.p);
        let c2 = (self.beta.modpow(&k, &self.params.p) * message) % &self.params.p;
        Ok((c1, c2))
    }
}

/// Private key `alpha in [1, Q)`.
#[derive(Clone)]
pub struct EgPrivateKey {
    alpha: BigUint,
    pub_key: EgPublicKey,
}

impl Drop for EgPrivateKey {
    fn drop(&mut self) {
        // BigUint has no in-place zeroize; best effort is to overwrite the
        // backing limbs by replacing with a zero value of the same length.
        self.alpha = BigUint::from(0_u32);
    }
}

impl EgPrivateKey {
    /// Samples a fresh key with `alpha` uniform in `[1, Q)`.
    pub fn generate<R: RngCore + CryptoRng>(params: &PublicParams, rng: &mut R) -> Self {
        let alpha = arith::sample_range(rng, &BigUint::one(), &params.q)
            .expect("q > 1 for any valid public parameter set");
        Self::from_alpha(alpha, params.clone())
    }

    /// Restores a key from an explicit scalar, validating `alpha in [1, Q)`.
    pub fn from_scalar(alpha: BigUint, params: PublicParams) -> Result<Self, EgError> {
        if alpha.is_zero() || alpha >= params.q {
            return Err(EgError::InvalidKey(alpha.to_string()));
        }
        Ok(Self::from_alpha(alpha, params))
    }

    fn from_alpha(alpha: BigUint, params: PublicParams) -> Self {
        let beta = params.g.modpow(&alpha, &params.p);
        Self {
            alpha,
            pub_key: EgPublicKey { beta, params },
        }
    }

    pub fn public_key(&self) -> &EgPublicKey {
        &self.pub_key
    }

    pub(crate) fn alpha(&self) -> &BigUint {
        &self.alpha
    }

    pub(crate) fn params(&self) -> &PublicParams {
        &self.pub_key.params
    }

    pub fn encrypt<R: RngCore + CryptoRng>(
        &self,
        message: &BigUint,
        rng: &mut R,
    ) -> Result<Ciphertext, EgError> {
        self.pub_key.encrypt(message, rng)
    }

    /// `c2 * (c1^alpha)^-1 mod P`.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<BigUint, EgError> {
        let (c1, c2) = ciphertext;
        let p = &self.pub_key.params.p;
        let shared = c1.modpow(&self.alpha, p);
        let inv = arith::mod_inverse(&shared, p)?;
        Ok((c2 * inv) % p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eg::params::PublicParams;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn round_trip_for_valid_messages() {
        let params = PublicParams::default_params();
        let mut r = rng();
        let key = EgPrivateKey::generate(&params, &mut r);
        for m in [2_u32, 17, 9999, 90] {
            let message = BigUint::from(m);
            let ciphertext = key.encrypt(&message, &mut r).unwrap();
            let recovered = key.decrypt(&ciphertext).unwrap();
            assert_eq!(recovered, message);
        }
    }

    #[test]
    fn rejects_zero_message() {
        let params = PublicParams::default_params();
        let mut r = rng();
        let key = EgPrivateKey::generate(&params, &mut r);
        assert!(key.encrypt(&BigUint::from(0_u32), &mut r).is_err());
    }

    #[test]
    fn from_scalar_rejects_out_of_range() {
        let params = PublicParams::default_params();
        assert!(EgPrivateKey::from_scalar(BigUint::from(0_u32), params.clone()).is_err());
        assert!(EgPrivateKey::from_scalar(params.q.clone(), params).is_err());
    }
}
