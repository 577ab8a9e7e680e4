//! Elliptic-curve commutative cipher (shuffle-and-lock fast path).
//!
//! A private key is a scalar `alpha` on the curve's order. `mask` multiplies
//! a point by `alpha`; `unmask` multiplies by its modular inverse. Because
//! scalar multiplication on a group commutes, two independently generated
//! keys compose in either order — this is the property the dealer's
//! shuffle/deal workflow rests on. Default curve: SECP256k1 (spec.md §6).

pub mod error;

pub use error::EcError;

use crate::arith;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar};
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// A commutative EC key: a scalar `alpha` that masks/unmasks points by
/// scalar multiplication and modular inversion of `alpha` mod the curve
/// order.
#[derive(Clone)]
pub struct EcKey {
    alpha: Scalar,
}

impl Drop for EcKey {
    fn drop(&mut self) {
        self.alpha.zeroize();
    }
}

impl EcKey {
    /// Samples a fresh key with `alpha` uniform in `[2, n)`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let candidate = Scalar::random(&mut *rng);
            if candidate != Scalar::ZERO && candidate != Scalar::ONE {
                return Self { alpha: candidate };
            }
        }
    }

    /// Restores a key from a big-endian scalar value, validating it lies in
    /// `[2, n)`.
    pub fn from_scalar_bytes(bytes: &[u8; 32]) -> Result<Self, EcError> {
        let repr = k256::FieldBytes::clone_from_slice(bytes);
        let candidate = Scalar::from_repr(repr);
        let alpha = Option::<Scalar>::from(candidate)
            .ok_or_else(|| EcError::InvalidKey(hex::encode(bytes)))?;
        if alpha == Scalar::ZERO || alpha == Scalar::ONE {
            return Err(EcError::InvalidKey(hex::encode(bytes)));
        }
        Ok(Self { alpha })
    }

    /// `mask(P) = alpha * P`.
    pub fn mask(&self, point: &ProjectivePoint) -> ProjectivePoint {
        let _span = tracing::trace_span!(target: "mental_poker::ec", "mask").entered();
        point * &self.alpha
    }

    /// `unmask(P) = alpha^-1 * P`, the modular inverse taken mod the curve
    /// order. `unmask(mask(P)) == P` for every key and point.
    pub fn unmask(&self, point: &ProjectivePoint) -> Result<ProjectivePoint, EcError> {
        let _span = tracing::trace_span!(target: "mental_poker::ec", "unmask").entered();
        let inv = scalar_invert(&self.alpha)?;
        Ok(point * &inv)
    }
}

/// Inverts a scalar mod the curve order; `Scalar::invert` only fails for
/// zero, which private keys never hold.
fn scalar_invert(alpha: &Scalar) -> Result<Scalar, EcError> {
    Option::<Scalar>::from(alpha.invert())
        .ok_or(EcError::NonInvertible(arith::ArithError::NonInvertible))
}

/// Curve generator, re-exported for deck generation.
pub fn generator() -> ProjectivePoint {
    ProjectivePoint::GENERATOR
}

/// Uncompressed SEC1 hex encoding of a point, per spec.md §6.
pub fn point_to_hex(point: &ProjectivePoint) -> String {
    let encoded: EncodedPoint = point.to_affine().to_encoded_point(false);
    hex::encode(encoded.as_bytes())
}

/// Parses a point from its uncompressed SEC1 hex encoding.
pub fn hex_to_point(hex_str: &str) -> Result<ProjectivePoint, EcError> {
    let bytes = hex::decode(hex_str).map_err(|e| EcError::InvalidPointEncoding(e.to_string()))?;
    let encoded = EncodedPoint::from_bytes(&bytes)
        .map_err(|e| EcError::InvalidPointEncoding(e.to_string()))?;
    let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or_else(|| EcError::InvalidPointEncoding(hex_str.to_string()))?;
    Ok(ProjectivePoint::from(affine))
}

/// x-coordinate of a point as a big-endian integer, used to key the
/// point-to-card table.
pub fn point_x(point: &ProjectivePoint) -> BigUint {
    let affine = point.to_affine();
    let encoded = affine.to_encoded_point(false);
    BigUint::from_bytes_be(encoded.x().expect("non-identity point has an x-coordinate"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn round_trip_for_every_key_and_point() {
        let mut r = rng();
        for _ in 0..50 {
            let key = EcKey::generate(&mut r);
            let point = generator() * Scalar::random(&mut r);
            let masked = key.mask(&point);
            let unmasked = key.unmask(&masked).unwrap();
            assert_eq!(unmasked, point);
        }
    }

    #[test]
    fn masking_commutes_across_keys() {
        let mut r = rng();
        let k1 = EcKey::generate(&mut r);
        let k2 = EcKey::generate(&mut r);
        let point = generator() * Scalar::random(&mut r);

        let a = k1.mask(&k2.mask(&point));
        let b = k2.mask(&k1.mask(&point));
        assert_eq!(a, b);

        let unmasked = k1.unmask(&k2.unmask(&a).unwrap()).unwrap();
        assert_eq!(unmasked, point);
    }

    #[test]
    fn hex_round_trip() {
        let mut r = rng();
        let point = generator() * Scalar::random(&mut r);
        let hex_str = point_to_hex(&point);
        let parsed = hex_to_point(&hex_str).unwrap();
        assert_eq!(parsed, point);
    }
}
