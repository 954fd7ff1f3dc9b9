pub mod error;
pub mod periods;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

pub use error::AmortizationError;
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortizationResult<T> = Result<T, AmortizationError>;
