use thiserror::Error;

#[derive(Error, Debug)]
pub enum EgError {
    #[error("message {0} is not a valid integer in Z_P*")]
    InvalidMessage(String),

    #[error("private key scalar {0} is outside the valid range [1, Q)")]
    InvalidKey(String),

    #[error("no modular inverse for this element")]
    NonInvertible(#[from] crate::arith::ArithError),

    #[error("private key does not correspond to any layer of this ciphertext")]
    KeyDoesNotMatchCiphertext,
}
