pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "affordability")]
pub mod affordability;

#[cfg(feature = "commission")]
pub mod commission;

#[cfg(feature = "seller_net")]
pub mod seller_net;

#[cfg(feature = "investment")]
pub mod investment;

pub use error::DealEconomicsError;
pub use types::*;

/// Standard result type for all deal-economics operations
pub type DealEconomicsResult<T> = Result<T, DealEconomicsError>;
