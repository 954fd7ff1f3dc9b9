use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::periods::{compounding_periods_per_year, payment_periods_per_year, DurationType};
use crate::time_value::{annuity_payment, checked_pow, nth_root};
use crate::types::{round_internal, Money, Rate, Years};
use crate::AmortizationResult;

use super::parameters::LoanParameters;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const WEEKS_PER_YEAR: Decimal = dec!(52);

/// Payment counts further than this from a whole number are an inconsistent term.
const TERM_TOLERANCE: Decimal = dec!(0.000001);

/// Upper bound on schedule length; keeps a schedule to a few thousand rows.
pub const MAX_TOTAL_PAYMENTS: u32 = 12_000;

/// Values derived from a [`LoanParameters`] by [`recalculate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedValues {
    /// Interest rate applied at each payment.
    pub rate_per_period: Rate,
    /// Annual rate after compounding (equal to the nominal rate for simple loans).
    pub effective_annual_rate: Rate,
    pub total_payments: u32,
    pub num_years: Years,
    /// Level principal-and-interest payment at internal precision (10 dp).
    pub monthly_pi_payment: Money,
    /// P&I plus escrow add-ons. Additional principal is not included.
    pub total_monthly_payment: Money,
}

/// Loan term converted to years.
pub fn num_years_in_loan(params: &LoanParameters) -> AmortizationResult<Years> {
    if params.loan_term <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "loan_term",
            "Loan term must be positive",
        ));
    }

    let years = match params.duration_type {
        DurationType::Years => params.loan_term,
        DurationType::Months => params.loan_term / MONTHS_PER_YEAR,
        DurationType::Weeks => params.loan_term / WEEKS_PER_YEAR,
        DurationType::Payments => {
            params.loan_term / payment_periods_per_year(params.payment_period)?
        }
    };
    Ok(years)
}

/// Number of payments over the life of the loan.
///
/// Multiplies before dividing so whole-period terms stay exact in decimal.
pub fn total_payments(params: &LoanParameters) -> AmortizationResult<u32> {
    let per_year = payment_periods_per_year(params.payment_period)?;
    let term = params.loan_term;

    let scaled = || {
        term.checked_mul(per_year)
            .ok_or_else(|| AmortizationError::overflow("loan_term * payments per year"))
    };
    let raw = match params.duration_type {
        DurationType::Years => scaled()?,
        DurationType::Months => scaled()? / MONTHS_PER_YEAR,
        DurationType::Weeks => scaled()? / WEEKS_PER_YEAR,
        DurationType::Payments => term,
    };

    if raw <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "loan_term",
            "Loan term must yield at least one payment",
        ));
    }

    let whole = raw.round();
    if (raw - whole).abs() > TERM_TOLERANCE || whole.is_zero() {
        return Err(AmortizationError::InvalidTerm {
            total_payments: raw.normalize().to_string(),
        });
    }

    whole
        .to_u32()
        .filter(|n| *n <= MAX_TOTAL_PAYMENTS)
        .ok_or_else(|| {
            AmortizationError::invalid(
                "loan_term",
                format!("Loan term exceeds {MAX_TOTAL_PAYMENTS} payments"),
            )
        })
}

/// Interest rate applied at each payment period.
///
/// Simple loans divide the nominal rate by payments per year. Otherwise the
/// rate per payment is the one that grows a unit balance by the same amount
/// over a year as compounding the nominal rate does.
pub fn effective_interest_rate(params: &LoanParameters) -> AmortizationResult<Rate> {
    let (per_period, _) = period_and_annual_rates(params)?;
    Ok(per_period)
}

/// Effective annual rate implied by the nominal rate and compounding frequency.
pub fn effective_annual_rate(params: &LoanParameters) -> AmortizationResult<Rate> {
    let (_, annual) = period_and_annual_rates(params)?;
    Ok(annual)
}

fn period_and_annual_rates(params: &LoanParameters) -> AmortizationResult<(Rate, Rate)> {
    if params.interest_rate < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "interest_rate",
            "Interest rate cannot be negative",
        ));
    }

    let compounding = compounding_periods_per_year(params.compounding_period)?;
    let payments = payment_periods_per_year(params.payment_period)?;
    let nominal = params.interest_rate / dec!(100);

    if params.is_simple {
        return Ok((nominal / payments, nominal));
    }

    let compounding_n = params.compounding_period.periods_per_year();
    let payments_n = params.payment_period.periods_per_year();

    let per_compounding = Decimal::ONE + nominal / compounding;
    let growth = checked_pow(per_compounding, compounding_n)?;
    let annual = growth - Decimal::ONE;

    // Same frequency: the conversion collapses to a straight division.
    if compounding_n == payments_n {
        return Ok((nominal / payments, annual));
    }

    // Whole compounding periods per payment: an integer power, no root needed.
    let per_period = if compounding_n % payments_n == 0 {
        checked_pow(per_compounding, compounding_n / payments_n)? - Decimal::ONE
    } else {
        nth_root(growth, payments_n)? - Decimal::ONE
    };
    Ok((per_period, annual))
}

/// Everything the borrower could pay over the full term, which bounds every
/// running total in the schedule.
fn check_lifetime_outlay(
    params: &LoanParameters,
    total_monthly_payment: Money,
    total_payments: u32,
) -> AmortizationResult<()> {
    total_monthly_payment
        .checked_add(params.additional_principal)
        .and_then(|per_payment| per_payment.checked_mul(Decimal::from(total_payments)))
        .map(|_| ())
        .ok_or_else(|| AmortizationError::overflow("lifetime payments"))
}

/// Derive the rate, payment count and level payment for a loan.
///
/// All validation happens here, before any schedule row is produced.
pub fn recalculate(params: &LoanParameters) -> AmortizationResult<DerivedValues> {
    params.validate()?;

    let num_years = num_years_in_loan(params)?;
    let total_payments = total_payments(params)?;
    let (rate_per_period, effective_annual_rate) = period_and_annual_rates(params)?;

    let monthly_pi_payment = round_internal(annuity_payment(
        params.opening_balance,
        rate_per_period,
        total_payments,
    )?);
    let total_monthly_payment = monthly_pi_payment
        .checked_add(params.escrow_per_payment())
        .ok_or_else(|| AmortizationError::overflow("payment plus escrow"))?;
    check_lifetime_outlay(params, total_monthly_payment, total_payments)?;

    tracing::debug!(
        %rate_per_period,
        total_payments,
        %monthly_pi_payment,
        %total_monthly_payment,
        "recalculated loan"
    );

    Ok(DerivedValues {
        rate_per_period,
        effective_annual_rate,
        total_payments,
        num_years,
        monthly_pi_payment,
        total_monthly_payment,
    })
}
