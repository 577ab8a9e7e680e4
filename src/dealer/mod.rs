//! The dealer workflow (spec.md §4.6, §4.7, §9): shuffle-lock, deal-lock,
//! partial and full reveal, in both the EC and EG cipher flavours.

pub mod ec_dealer;
pub mod eg_dealer;
pub mod error;

pub use ec_dealer::EcDealer;
pub use eg_dealer::EgDealer;
pub use error::DealerError;
