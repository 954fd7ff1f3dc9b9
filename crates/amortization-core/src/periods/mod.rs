//! Period conversion: compounding and payment frequencies to per-year counts.
//!
//! Every enum is closed, with an explicit capability table. Variants outside
//! the supported subset are matched exhaustively and rejected with
//! [`AmortizationError::UnsupportedPeriod`](crate::error::AmortizationError)
//! rather than approximated.

pub mod compounding;
pub mod duration;
pub mod payment;

pub use compounding::{compounding_periods_per_year, CompoundingPeriod};
pub use duration::DurationType;
pub use payment::{payment_periods_per_year, PaymentPeriod};

/// Normalise a user-supplied enum label: case-insensitive, `-`, `_` and spaces ignored.
pub(crate) fn normalise_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
