use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealerError {
    #[error(transparent)]
    Ec(#[from] crate::ec::EcError),

    #[error(transparent)]
    Eg(#[from] crate::eg::EgError),

    #[error("revealed element is not in the canonical card table")]
    UnknownCardEncoding,

    #[error("residual value after applying the supplied keys is still a ciphertext")]
    IncompleteDecryption,

    #[error("unknown deck id: {0}")]
    UnknownDeck(String),

    #[error("card index {index} out of range for deck {deck_id} ({len} cards)")]
    CardIndexOutOfRange {
        index: usize,
        deck_id: String,
        len: usize,
    },
}
