pub mod error;
pub mod forms;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "transfer_tax")]
pub mod transfer_tax;

#[cfg(feature = "waterfall")]
pub mod waterfall;

#[cfg(feature = "catalog")]
pub mod catalog;

pub use error::PropCalcError;
pub use types::*;

/// Standard result type for all propcalc operations
pub type PropCalcResult<T> = Result<T, PropCalcError>;
