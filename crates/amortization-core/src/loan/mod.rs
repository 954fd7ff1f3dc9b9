//! Fixed-term loan engine: parameters in, derived values and a schedule out.
//!
//! Nothing here caches. [`recalculate`] and [`generate_schedule`] are pure
//! functions of an immutable [`LoanParameters`], so re-running them after a
//! parameter change can never observe stale derived values.

pub mod calculator;
pub mod parameters;
pub mod schedule;

pub use calculator::{
    effective_annual_rate, effective_interest_rate, num_years_in_loan, recalculate,
    total_payments, DerivedValues,
};
pub use parameters::{LoanParameters, LoanType};
pub use schedule::{build_amortization, generate_schedule, AmortizationOutput, ScheduleEntry};
