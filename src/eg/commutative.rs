//! Extended ElGamal: universal re-encryption and the commutative, set-oriented
//! mode (Weis, MIT thesis §5 — spec.md §4.4). Any party can re-randomize a
//! ciphertext without the private key; decryption by a key "peels" one
//! encryption layer and returns a still-commutatively-encrypted multiset.
//!
//! Layout note: each element is a nested pair of pairs. Following the
//! reference implementation bit-for-bit (spec.md §6 "nested pair layout
//! quirk"), a plain ElGamal encryption naturally returns `(c1, c2) = (G^k,
//! beta^k * m)`, but the element stores the pair as `(msg_term, rand_term) =
//! (c2, c1)` — the message-carrying term first. `universal_reencrypt` and
//! `commutative_decrypt` are written against this swapped layout, not the
//! natural one; this is a deliberate wire-format choice (see DESIGN.md), not
//! left unfixed by oversight.

use super::basic::{Ciphertext, EgPrivateKey, EgPublicKey};
use super::error::EgError;
use super::params::PublicParams;
use crate::arith;
use num_bigint::BigUint;
use num_traits::One;
use rand::{CryptoRng, RngCore};

/// One ElGamal ciphertext stored as `(msg_term, rand_term)` — see the module
/// doc for why this is not `(c1, c2)` in that order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pair {
    pub msg_term: BigUint,
    pub rand_term: BigUint,
}

impl Pair {
    fn from_natural(ciphertext: Ciphertext) -> Self {
        let (c1, c2) = ciphertext;
        Pair {
            msg_term: c2,
            rand_term: c1,
        }
    }

    fn to_natural(&self) -> Ciphertext {
        (self.rand_term.clone(), self.msg_term.clone())
    }
}

/// A commutatively-encrypted element: a plaintext-carrying pair plus an
/// auxiliary pair that encrypts the constant `1`, used by universal
/// re-encryption to re-randomize the plaintext pair without the key.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub plaintext_pair: Pair,
    pub blinding_pair: Pair,
}

/// An unordered multiset of commutative-encrypted elements. Order carries no
/// meaning; every operation that produces a set shuffles it before handing
/// it back.
pub type CommutativeSet = Vec<Element>;

/// Tagged union dispatched on at `commutative_encrypt`/`commutative_decrypt`
/// call sites, standing in for the source's runtime type inspection of
/// "integer" vs. "list of elements" (spec.md §9).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CommutativeMessage {
    Plaintext(BigUint),
    Ciphertext(CommutativeSet),
}

/// Result of peeling one layer: either the fully-recovered integer or a
/// shorter still-encrypted set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommutativeValue {
    Integer(BigUint),
    Set(CommutativeSet),
}

impl From<CommutativeValue> for CommutativeMessage {
    fn from(value: CommutativeValue) -> Self {
        match value {
            CommutativeValue::Integer(v) => CommutativeMessage::Plaintext(v),
            CommutativeValue::Set(s) => CommutativeMessage::Ciphertext(s),
        }
    }
}

impl EgPublicKey {
    /// Universal re-encryption of a single element: re-randomizes the
    /// ciphertext with fresh `t, u` and no knowledge of the private key
    /// (spec.md §4.4.1).
    pub fn universal_reencrypt<R: RngCore + CryptoRng>(
        &self,
        element: &Element,
        rng: &mut R,
    ) -> Element {
        let p = &self.params.p;
        let t = arith::sample_range(rng, &BigUint::one(), &self.params.q)
            .expect("q > 1 for any valid public parameter set");
        let u = arith::sample_range(rng, &BigUint::one(), &self.params.q)
            .expect("q > 1 for any valid public parameter set");

        let new_plaintext = Pair {
            msg_term: (&element.plaintext_pair.msg_term
                * element.blinding_pair.msg_term.modpow(&t, p))
                % p,
            rand_term: (&element.plaintext_pair.rand_term
                * element.blinding_pair.rand_term.modpow(&t, p))
                % p,
        };
        let new_blinding = Pair {
            msg_term: element.blinding_pair.msg_term.modpow(&u, p),
            rand_term: element.blinding_pair.rand_term.modpow(&u, p),
        };

        Element {
            plaintext_pair: new_plaintext,
            blinding_pair: new_blinding,
        }
    }

    /// Commutatively encrypts a message, which is either a fresh integer
    /// (first layer) or an existing commutative ciphertext (subsequent
    /// layer). Always returns a set — length 1 for the integer case,
    /// `L + 1` for the set case (spec.md §4.4.2).
    pub fn commutative_encrypt<R: RngCore + CryptoRng>(
        &self,
        message: &CommutativeMessage,
        rng: &mut R,
    ) -> Result<CommutativeSet, EgError> {
        match message {
            CommutativeMessage::Plaintext(m) => {
                let plaintext_pair = Pair::from_natural(self.encrypt(m, rng)?);
                let blinding_pair = Pair::from_natural(self.encrypt(&BigUint::one(), rng)?);
                Ok(vec![Element {
                    plaintext_pair,
                    blinding_pair,
                }])
            }
            CommutativeMessage::Ciphertext(set) => {
                let l = set.len();
                let mut rs = Vec::with_capacity(l);
                for _ in 0..l {
                    rs.push(arith::sample_range(rng, &BigUint::one(), &self.params.q)
                        .expect("q > 1 for any valid public parameter set"));
                }
                let product = arith::product_mod(&rs, &self.params.p);
                let r_last = (arith::mod_inverse(&product, &self.params.p)?) % &self.params.p;

                let mut result =
                    self.commutative_encrypt(&CommutativeMessage::Plaintext(r_last), rng)?;

                for (i, element) in set.iter().enumerate() {
                    let mut tweaked = element.clone();
                    tweaked.plaintext_pair.msg_term =
                        (&rs[i] * &tweaked.plaintext_pair.msg_term) % &self.params.p;
                    result.push(self.universal_reencrypt(&tweaked, rng));
                }

                arith::shuffle_in_place(rng, &mut result);
                Ok(result)
            }
        }
    }
}

impl EgPrivateKey {
    pub fn universal_reencrypt<R: RngCore + CryptoRng>(
        &self,
        element: &Element,
        rng: &mut R,
    ) -> Element {
        self.public_key().universal_reencrypt(element, rng)
    }

    pub fn commutative_encrypt<R: RngCore + CryptoRng>(
        &self,
        message: &CommutativeMessage,
        rng: &mut R,
    ) -> Result<CommutativeSet, EgError> {
        self.public_key().commutative_encrypt(message, rng)
    }

    /// Peels one layer of encryption under this key. Identifies the element
    /// whose blinding pair decrypts to `1`, recovers the residual scalar it
    /// carries, and re-randomizes the remaining `L - 1` elements so the
    /// product of their plaintexts is preserved (spec.md §4.4.3).
    ///
    /// Only the first matching element is processed: cryptographically at
    /// most one element's blinding pair should decrypt to `1` under a given
    /// key, and treating a second accidental match as real would silently
    /// inflate the result set rather than signal the anomaly.
    pub fn commutative_decrypt<R: RngCore + CryptoRng>(
        &self,
        set: CommutativeSet,
        rng: &mut R,
    ) -> Result<CommutativeValue, EgError> {
        let _span = tracing::debug_span!(target: "mental_poker::eg", "commutative_decrypt", len = set.len()).entered();
        let p = self.params().p.clone();
        let q = self.params().q.clone();

        if set.len() == 1 {
            let element = &set[0];
            if self.decrypt(&element.blinding_pair.to_natural())? == BigUint::one() {
                return Ok(CommutativeValue::Integer(
                    self.decrypt(&element.plaintext_pair.to_natural())?,
                ));
            }
            return Err(EgError::KeyDoesNotMatchCiphertext);
        }

        for j in 0..set.len() {
            if self.decrypt(&set[j].blinding_pair.to_natural())? != BigUint::one() {
                continue;
            }

            let val = self.decrypt(&set[j].plaintext_pair.to_natural())?;
            let l = set.len();
            let mut rs = Vec::with_capacity(l - 1);
            if l > 2 {
                for _ in 0..(l - 2) {
                    rs.push(arith::sample_range(rng, &BigUint::one(), &q)
                        .expect("q > 1 for any valid public parameter set"));
                }
                let product = arith::product_mod(&rs, &p);
                let r_last = (arith::mod_inverse(&product, &p)? * &val) % &p;
                rs.push(r_last);
            } else {
                rs.push(val);
            }

            let mut result = Vec::with_capacity(l - 1);
            let mut rs_iter = rs.into_iter();
            for (i, element) in set.iter().enumerate() {
                if i == j {
                    continue;
                }
                let r_i = rs_iter.next().expect("one r per remaining element");
                let mut tweaked = element.clone();
                tweaked.plaintext_pair.msg_term = (&r_i * &tweaked.plaintext_pair.msg_term) % &p;
                result.push(self.universal_reencrypt(&tweaked, rng));
            }

            arith::shuffle_in_place(rng, &mut result);
            return Ok(CommutativeValue::Set(result));
        }

        Err(EgError::KeyDoesNotMatchCiphertext)
    }

    /// Shamir three-pass re-encryption: shifts a basic ElGamal ciphertext
    /// from this key's regime toward a neighbour's public key, without
    /// exposing either private key (spec.md §6).
    pub fn three_pass_reencrypt<R: RngCore + CryptoRng>(
        &self,
        ciphertext: &Ciphertext,
        neighbor_beta: &BigUint,
        rng: &mut R,
    ) -> Result<Ciphertext, EgError> {
        let params: &PublicParams = self.params();
        let (c1, c2) = ciphertext;
        let k = arith::sample_range(rng, &BigUint::one(), &params.q)
            .expect("q > 1 for any valid public parameter set");
        let z1 = (c1 * params.g.modpow(&k, &params.p)) % &params.p;
        let z2 = (z1.modpow(self.alpha(), &params.p) * neighbor_beta.modpow(&k, &params.p) * c2)
            % &params.p;
        Ok((z1, z2))
    }

    /// Shamir three-pass re-decryption counterpart to
    /// [`EgPrivateKey::three_pass_reencrypt`].
    pub fn three_pass_redecrypt<R: RngCore + CryptoRng>(
        &self,
        ciphertext: &Ciphertext,
        neighbor_beta: &BigUint,
        rng: &mut R,
    ) -> Result<Ciphertext, EgError> {
        let params: &PublicParams = self.params();
        let (c1, c2) = ciphertext;
        let k = arith::sample_range(rng, &BigUint::one(), &params.q)
            .expect("q > 1 for any valid public parameter set");
        let z1 = (c1 * params.g.modpow(&k, &params.p)) % &params.p;
        let shared = c1.modpow(self.alpha(), &params.p);
        let inv = arith::mod_inverse(&shared, &params.p)?;
        let z2 = (inv * neighbor_beta.modpow(&k, &params.p) * c2) % &params.p;
        Ok((z1, z2))
    }
}
