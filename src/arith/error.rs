use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithError {
    /// Requested the modular inverse of an element sharing a factor with the
    /// modulus. Not recoverable by retrying with the same inputs; the caller
    /// passed a value that should never have reached this point.
    #[error("no modular inverse exists for the given element and modulus")]
    NonInvertible,

    #[error("sampling range is empty: [{low}, {high})")]
    EmptyRange { low: String, high: String },
}
