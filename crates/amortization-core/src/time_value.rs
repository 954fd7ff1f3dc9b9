use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

const ROOT_CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000000000000000001);
const MAX_ROOT_ITERATIONS: u32 = 100;

/// `base^n` by repeated multiplication, failing instead of panicking on overflow.
pub fn checked_pow(base: Decimal, n: u32) -> AmortizationResult<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result
            .checked_mul(base)
            .ok_or_else(|| AmortizationError::overflow(format!("{base}^{n}")))?;
    }
    Ok(result)
}

/// The positive nth root of `x` via Newton's method.
pub fn nth_root(x: Decimal, n: u32) -> AmortizationResult<Decimal> {
    nth_root_bounded(x, n, MAX_ROOT_ITERATIONS)
}

fn nth_root_bounded(x: Decimal, n: u32, max_iterations: u32) -> AmortizationResult<Decimal> {
    if n == 0 {
        return Err(AmortizationError::DivisionByZero {
            context: "zeroth root".into(),
        });
    }
    if x <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "growth_factor",
            format!("cannot take root of non-positive value {x}"),
        ));
    }
    if n == 1 || x == Decimal::ONE {
        return Ok(x);
    }

    let n_dec = Decimal::from(n);
    // Bernoulli: (1 + (x - 1)/n)^n >= x, so iteration starts at or above the root
    // and g^n - x is convex there.
    let mut guess = Decimal::ONE + (x - Decimal::ONE) / n_dec;
    let mut last_delta = Decimal::ZERO;

    for _ in 0..max_iterations {
        let g_n_minus_1 = checked_pow(guess, n - 1)?;
        let g_n = g_n_minus_1
            .checked_mul(guess)
            .ok_or_else(|| AmortizationError::overflow("nth_root"))?;
        let slope = n_dec
            .checked_mul(g_n_minus_1)
            .ok_or_else(|| AmortizationError::overflow("nth_root"))?;
        if slope.is_zero() {
            return Err(AmortizationError::DivisionByZero {
                context: "nth_root derivative".into(),
            });
        }

        last_delta = (g_n - x) / slope;
        guess -= last_delta;
        if last_delta.abs() < ROOT_CONVERGENCE_THRESHOLD {
            return Ok(guess);
        }
    }

    Err(AmortizationError::ConvergenceFailure {
        function: "nth_root".into(),
        iterations: max_iterations,
        last_delta,
    })
}

/// Level payment that fully amortizes `principal` over `nper` periods at `rate` per period.
///
/// `payment = P * r * f / (f - 1)` with `f = (1 + r)^n`. The ratio `f / (f - 1)`
/// is taken first; it tends to one as `f` grows, so large growth factors only
/// overflow when the payment itself would.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> AmortizationResult<Money> {
    if nper == 0 {
        return Err(AmortizationError::invalid(
            "total_payments",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = checked_pow(Decimal::ONE + rate, nper)?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    let ratio = factor
        .checked_div(denominator)
        .ok_or_else(|| AmortizationError::overflow("annuity factor"))?;

    rate.checked_mul(ratio)
        .and_then(|per_unit| principal.checked_mul(per_unit))
        .ok_or_else(|| AmortizationError::overflow("annuity payment"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_checked_pow_exact() {
        assert_eq!(checked_pow(dec!(1.005), 2).unwrap(), dec!(1.010025));
        assert_eq!(checked_pow(dec!(7), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_checked_pow_overflow() {
        let err = checked_pow(dec!(1000), 30).unwrap_err();
        assert!(matches!(err, AmortizationError::Overflow { .. }));
    }

    #[test]
    fn test_nth_root_inverts_pow() {
        let x = checked_pow(dec!(1.005), 12).unwrap();
        let root = nth_root(x, 12).unwrap();
        assert!((root - dec!(1.005)).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_nth_root_large_growth_factor() {
        let x = checked_pow(dec!(3.5), 6).unwrap();
        let root = nth_root(x, 6).unwrap();
        assert!((root - dec!(3.5)).abs() < dec!(0.000000000001), "got {root}");
    }

    #[test]
    fn test_nth_root_rejects_non_positive() {
        assert!(nth_root(Decimal::ZERO, 4).is_err());
        assert!(nth_root(dec!(1.1), 0).is_err());
    }

    #[test]
    fn test_nth_root_reports_non_convergence() {
        let err = nth_root_bounded(dec!(2), 3, 1).unwrap_err();
        match err {
            AmortizationError::ConvergenceFailure {
                function,
                iterations,
                last_delta,
            } => {
                assert_eq!(function, "nth_root");
                assert_eq!(iterations, 1);
                assert!(last_delta > Decimal::ZERO);
            }
            other => panic!("expected ConvergenceFailure, got {other}"),
        }
    }

    #[test]
    fn test_annuity_payment_thirty_year_mortgage() {
        let pmt = annuity_payment(dec!(100000), dec!(0.005), 360).unwrap();
        // 100k at 6%/12 over 360 months => ~599.55
        assert!((pmt - dec!(599.55)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        assert_eq!(annuity_payment(dec!(10000), Decimal::ZERO, 10).unwrap(), dec!(1000));
    }

    #[test]
    fn test_annuity_payment_single_period() {
        // One period: principal plus one period of interest
        let pmt = annuity_payment(dec!(1000), dec!(0.05), 1).unwrap();
        assert_eq!(pmt, dec!(1050));
    }

    #[test]
    fn test_annuity_payment_zero_periods() {
        assert!(annuity_payment(dec!(1000), dec!(0.05), 0).is_err());
    }

    #[test]
    fn test_annuity_payment_huge_growth_factor_stays_near_interest_only() {
        // (4/3)^220 ~ 3e27: the payment is interest on the principal plus a sliver
        let rate = dec!(4) / dec!(12);
        let pmt = annuity_payment(dec!(1000), rate, 220).unwrap();
        assert!((pmt - dec!(1000) * rate).abs() < dec!(0.0000001), "got {pmt}");
    }

    #[test]
    fn test_annuity_payment_overflow_is_an_error() {
        let err = annuity_payment(Decimal::MAX, dec!(1), 2).unwrap_err();
        assert!(matches!(err, AmortizationError::Overflow { .. }));
    }
}
