use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{round_currency, with_metadata, ComputationOutput, Money};
use crate::AmortizationResult;

use super::calculator::{recalculate, DerivedValues};
use super::parameters::{LoanParameters, LoanType};

/// One payment period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based payment number.
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Balance remaining after this payment.
    pub balance: Money,
    pub interest: Money,
    pub principal: Money,
    /// Cumulative interest through this payment.
    pub interest_paid: Money,
    /// Cumulative principal through this payment.
    pub principal_paid: Money,
}

impl ScheduleEntry {
    /// Principal and interest actually paid this period.
    pub fn payment(&self) -> Money {
        self.interest + self.principal
    }
}

/// Build the period-by-period schedule for already-derived loan values.
///
/// Interest is rounded half-up to cents every period; the level payment keeps
/// its internal precision, so principal and balance carry sub-cent digits until
/// presentation. The last scheduled payment, or any payment whose principal
/// would exceed the balance, retires the balance exactly. Returns an empty
/// schedule when there is nothing to amortize.
pub fn generate_schedule(params: &LoanParameters, derived: &DerivedValues) -> Vec<ScheduleEntry> {
    let total = derived.total_payments;
    let mut balance = params.opening_balance;

    if total == 0 || balance <= Decimal::ZERO {
        return Vec::new();
    }

    let rate = derived.rate_per_period;
    let payment = derived.monthly_pi_payment;
    let extra = params.additional_principal.max(Decimal::ZERO);
    let step = params.payment_period.months_between_payments();

    let mut schedule = Vec::with_capacity(total as usize);
    let mut interest_paid = Decimal::ZERO;
    let mut principal_paid = Decimal::ZERO;

    for period in 1..=total {
        let interest = round_currency(balance * rate);

        let mut principal = payment - interest + extra;
        if principal < Decimal::ZERO {
            tracing::warn!(period, %payment, %interest, "payment does not cover interest");
            principal = Decimal::ZERO;
        }
        if principal > balance || period == total {
            principal = balance;
        }

        balance -= principal;
        interest_paid += interest;
        principal_paid += principal;

        schedule.push(ScheduleEntry {
            period,
            date: payment_date(params.first_payment_date, step, period),
            balance,
            interest,
            principal,
            interest_paid,
            principal_paid,
        });

        if balance.is_zero() {
            break;
        }
    }

    tracing::debug!(
        payments = schedule.len(),
        scheduled = total,
        %interest_paid,
        "generated amortization schedule"
    );

    schedule
}

fn payment_date(first: Option<NaiveDate>, step: Option<u32>, period: u32) -> Option<NaiveDate> {
    let months = step?.checked_mul(period - 1)?;
    first?.checked_add_months(Months::new(months))
}

/// Full amortization result: derived values, schedule and lifetime totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub loan_type: LoanType,
    pub derived: DerivedValues,
    pub total_interest: Money,
    pub total_principal: Money,
    /// Taxes and insurance over the payments actually made.
    pub total_escrow: Money,
    pub total_paid: Money,
    pub payments_made: u32,
    /// Scheduled payments avoided by paying additional principal.
    pub payments_saved: u32,
    /// Principal and interest on the last payment.
    pub final_payment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    pub schedule: Vec<ScheduleEntry>,
}

/// Recalculate a loan and generate its schedule with lifetime totals.
pub fn build_amortization(
    params: &LoanParameters,
) -> AmortizationResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let derived = recalculate(params)?;
    let schedule = generate_schedule(params, &derived);

    let payments_made = schedule.len() as u32;
    let payments_saved = derived.total_payments.saturating_sub(payments_made);
    let (total_interest, total_principal, final_payment, payoff_date) = match schedule.last() {
        Some(last) => (last.interest_paid, last.principal_paid, last.payment(), last.date),
        None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, None),
    };
    let total_escrow = params.escrow_per_payment() * Decimal::from(payments_made);

    if payments_saved > 0 {
        tracing::info!(payments_saved, "additional principal shortens the loan");
        warnings.push(format!(
            "Additional principal of {} per payment retires the loan {payments_saved} payments early",
            params.additional_principal
        ));
    }

    let level_payment = round_currency(derived.monthly_pi_payment);
    let final_rounded = round_currency(final_payment);
    if payments_saved == 0 && payments_made > 0 && final_rounded != level_payment {
        warnings.push(format!(
            "Final payment adjusted to {final_rounded} (level payment {level_payment}) to retire the remaining balance"
        ));
    }

    let output = AmortizationOutput {
        loan_type: params.loan_type,
        derived,
        total_interest,
        total_principal,
        total_escrow,
        total_paid: total_interest + total_principal + total_escrow,
        payments_made,
        payments_saved,
        final_payment,
        payoff_date,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization (annuity formula, half-up cent rounding per period)",
        &serde_json::json!({
            "loan_type": params.loan_type.to_string(),
            "opening_balance": params.opening_balance.to_string(),
            "interest_rate_pct": params.interest_rate.to_string(),
            "loan_term": params.loan_term.to_string(),
            "duration_type": params.duration_type.to_string(),
            "compounding_period": params.compounding_period.to_string(),
            "payment_period": params.payment_period.to_string(),
            "is_simple": params.is_simple,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periods::{DurationType, PaymentPeriod};
    use rust_decimal_macros::dec;

    fn mortgage() -> LoanParameters {
        LoanParameters::new(dec!(100000), dec!(6), dec!(30))
    }

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected} ± {tol}, got {actual}"
        );
    }

    fn schedule_for(params: &LoanParameters) -> Vec<ScheduleEntry> {
        let derived = recalculate(params).unwrap();
        generate_schedule(params, &derived)
    }

    #[test]
    fn test_first_period_of_mortgage() {
        let schedule = schedule_for(&mortgage());
        let first = &schedule[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.interest, dec!(500.00));
        assert_close(first.principal, dec!(99.55), dec!(0.005));
        assert_close(first.balance, dec!(99900.45), dec!(0.005));
        assert_eq!(first.interest_paid, dec!(500.00));
        assert_eq!(first.principal_paid, first.principal);
        assert_eq!(first.balance + first.principal, dec!(100000));
    }

    #[test]
    fn test_mortgage_runs_full_term_to_zero() {
        let params = mortgage();
        let schedule = schedule_for(&params);
        assert_eq!(schedule.len(), 360);

        let last = schedule.last().unwrap();
        assert_eq!(last.balance, Decimal::ZERO);
        assert_eq!(last.principal_paid, params.opening_balance);

        let principal_sum: Decimal = schedule.iter().map(|e| e.principal).sum();
        assert_eq!(principal_sum, params.opening_balance);
    }

    #[test]
    fn test_level_payment_holds_until_final_period() {
        let params = mortgage();
        let derived = recalculate(&params).unwrap();
        let schedule = generate_schedule(&params, &derived);
        for entry in &schedule[..schedule.len() - 1] {
            assert_eq!(entry.payment(), derived.monthly_pi_payment, "period {}", entry.period);
        }
        // Final payment absorbs accumulated interest rounding
        let last = schedule.last().unwrap();
        assert_close(last.payment(), derived.monthly_pi_payment, dec!(5));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let mut params = LoanParameters::new(dec!(10000), dec!(0), dec!(10));
        params.duration_type = DurationType::Months;
        let derived = recalculate(&params).unwrap();
        let schedule = generate_schedule(&params, &derived);

        assert_eq!(schedule.len(), 10);
        for entry in &schedule {
            assert_eq!(entry.interest, Decimal::ZERO);
            assert_eq!(entry.principal, derived.monthly_pi_payment);
        }
        assert_eq!(schedule[9].balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_uneven_split_retires_balance() {
        let mut params = LoanParameters::new(dec!(100), dec!(0), dec!(3));
        params.duration_type = DurationType::Payments;
        let schedule = schedule_for(&params);
        let principals: Vec<Decimal> = schedule.iter().map(|e| e.principal).collect();
        assert_eq!(
            principals,
            vec![dec!(33.3333333333), dec!(33.3333333333), dec!(33.3333333334)]
        );
        assert_eq!(schedule[2].balance, Decimal::ZERO);
    }

    #[test]
    fn test_additional_principal_shortens_schedule() {
        let base = schedule_for(&mortgage());
        let mut params = mortgage();
        params.additional_principal = dec!(200);
        let accelerated = schedule_for(&params);

        assert!(accelerated.len() < base.len());
        assert_eq!(accelerated.last().unwrap().balance, Decimal::ZERO);
        assert_close(accelerated[0].principal, dec!(299.55), dec!(0.005));
        assert!(accelerated.last().unwrap().interest_paid < base.last().unwrap().interest_paid);
    }

    #[test]
    fn test_empty_schedule_when_nothing_to_amortize() {
        let params = mortgage();
        let mut derived = recalculate(&params).unwrap();
        derived.total_payments = 0;
        assert!(generate_schedule(&params, &derived).is_empty());

        let mut zero_balance = mortgage();
        zero_balance.opening_balance = Decimal::ZERO;
        let derived = recalculate(&mortgage()).unwrap();
        assert!(generate_schedule(&zero_balance, &derived).is_empty());
    }

    #[test]
    fn test_dates_advance_by_payment_period() {
        let mut params = LoanParameters::new(dec!(12000), dec!(5), dec!(2));
        params.payment_period = PaymentPeriod::Quarterly;
        params.first_payment_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        let schedule = schedule_for(&params);

        assert_eq!(schedule.len(), 8);
        assert_eq!(schedule[0].date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(schedule[1].date, NaiveDate::from_ymd_opt(2024, 4, 30));
        assert_eq!(schedule[7].date, NaiveDate::from_ymd_opt(2025, 10, 31));
    }

    #[test]
    fn test_no_dates_without_start() {
        let schedule = schedule_for(&mortgage());
        assert!(schedule.iter().all(|e| e.date.is_none()));
    }

    #[test]
    fn test_build_amortization_totals() {
        let mut params = mortgage();
        params.property_taxes = dec!(100);
        let out = build_amortization(&params).unwrap();
        let result = &out.result;

        assert_eq!(result.payments_made, 360);
        assert_eq!(result.payments_saved, 0);
        assert_eq!(result.total_principal, dec!(100000));
        assert_eq!(result.total_escrow, dec!(36000));
        assert_eq!(
            result.total_paid,
            result.total_interest + result.total_principal + result.total_escrow
        );
        // ~115,838 of interest over 30 years
        assert!((result.total_interest - dec!(115838)).abs() < dec!(10));
    }

    #[test]
    fn test_build_amortization_warns_on_early_payoff() {
        let mut params = mortgage();
        params.additional_principal = dec!(500);
        let out = build_amortization(&params).unwrap();
        assert!(out.result.payments_saved > 0);
        assert!(out.warnings.iter().any(|w| w.contains("early")));
    }

    #[test]
    fn test_build_amortization_rejects_invalid() {
        let mut params = mortgage();
        params.interest_rate = dec!(-2);
        assert!(build_amortization(&params).is_err());
    }
}
