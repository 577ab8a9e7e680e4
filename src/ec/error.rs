use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcError {
    #[error("private key scalar {0} is outside the valid range [2, n)")]
    InvalidKey(String),

    #[error("could not parse point from hex: {0}")]
    InvalidPointEncoding(String),

    #[error("no modular inverse for this scalar")]
    NonInvertible(#[from] crate::arith::ArithError),
}
