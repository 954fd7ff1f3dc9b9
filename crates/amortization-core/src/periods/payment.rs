use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AmortizationError;
use crate::AmortizationResult;

/// How often the borrower makes a payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentPeriod {
    Annually,
    TwicePerYear,
    Quarterly,
    EveryOtherMonth,
    #[default]
    Monthly,
    TwicePerMonth,
    EveryOtherWeek,
    Weekly,
}

impl PaymentPeriod {
    pub const ALL: [PaymentPeriod; 8] = [
        PaymentPeriod::Annually,
        PaymentPeriod::TwicePerYear,
        PaymentPeriod::Quarterly,
        PaymentPeriod::EveryOtherMonth,
        PaymentPeriod::Monthly,
        PaymentPeriod::TwicePerMonth,
        PaymentPeriod::EveryOtherWeek,
        PaymentPeriod::Weekly,
    ];

    /// Nominal payments per year, whether or not the engine supports it.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentPeriod::Annually => 1,
            PaymentPeriod::TwicePerYear => 2,
            PaymentPeriod::Quarterly => 4,
            PaymentPeriod::EveryOtherMonth => 6,
            PaymentPeriod::Monthly => 12,
            PaymentPeriod::TwicePerMonth => 24,
            PaymentPeriod::EveryOtherWeek => 26,
            PaymentPeriod::Weekly => 52,
        }
    }

    /// Calendar months between two consecutive payments, for month-aligned periods.
    pub fn months_between_payments(&self) -> Option<u32> {
        match self {
            PaymentPeriod::Annually => Some(12),
            PaymentPeriod::TwicePerYear => Some(6),
            PaymentPeriod::Quarterly => Some(3),
            PaymentPeriod::EveryOtherMonth => Some(2),
            PaymentPeriod::Monthly => Some(1),
            PaymentPeriod::TwicePerMonth
            | PaymentPeriod::EveryOtherWeek
            | PaymentPeriod::Weekly => None,
        }
    }

    /// Sub-monthly payment periods are not implemented.
    pub fn is_supported(&self) -> bool {
        self.months_between_payments().is_some()
    }
}

impl std::fmt::Display for PaymentPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentPeriod::Annually => write!(f, "Annually"),
            PaymentPeriod::TwicePerYear => write!(f, "Twice per Year"),
            PaymentPeriod::Quarterly => write!(f, "Quarterly"),
            PaymentPeriod::EveryOtherMonth => write!(f, "Every Other Month"),
            PaymentPeriod::Monthly => write!(f, "Monthly"),
            PaymentPeriod::TwicePerMonth => write!(f, "Twice per Month"),
            PaymentPeriod::EveryOtherWeek => write!(f, "Every Other Week"),
            PaymentPeriod::Weekly => write!(f, "Weekly"),
        }
    }
}

impl FromStr for PaymentPeriod {
    type Err = AmortizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalise_label(s).as_str() {
            "annually" | "annual" | "yearly" => Ok(PaymentPeriod::Annually),
            "twiceperyear" | "semiannually" => Ok(PaymentPeriod::TwicePerYear),
            "quarterly" => Ok(PaymentPeriod::Quarterly),
            "everyothermonth" | "bimonthly" => Ok(PaymentPeriod::EveryOtherMonth),
            "monthly" => Ok(PaymentPeriod::Monthly),
            "twicepermonth" | "semimonthly" => Ok(PaymentPeriod::TwicePerMonth),
            "everyotherweek" | "biweekly" => Ok(PaymentPeriod::EveryOtherWeek),
            "weekly" => Ok(PaymentPeriod::Weekly),
            _ => Err(AmortizationError::invalid(
                "payment_period",
                format!("unknown payment period '{s}'"),
            )),
        }
    }
}

/// Number of payments per year for a supported payment period.
pub fn payment_periods_per_year(period: PaymentPeriod) -> AmortizationResult<Decimal> {
    if !period.is_supported() {
        return Err(AmortizationError::UnsupportedPeriod {
            kind: "payment".into(),
            period: period.to_string(),
        });
    }
    Ok(Decimal::from(period.periods_per_year()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_supported_payment_periods() {
        let expected = [
            (PaymentPeriod::Annually, dec!(1)),
            (PaymentPeriod::TwicePerYear, dec!(2)),
            (PaymentPeriod::Quarterly, dec!(4)),
            (PaymentPeriod::EveryOtherMonth, dec!(6)),
            (PaymentPeriod::Monthly, dec!(12)),
        ];
        for (period, count) in expected {
            assert_eq!(payment_periods_per_year(period).unwrap(), count);
        }
    }

    #[test]
    fn test_sub_monthly_periods_rejected() {
        for period in [
            PaymentPeriod::TwicePerMonth,
            PaymentPeriod::EveryOtherWeek,
            PaymentPeriod::Weekly,
        ] {
            let err = payment_periods_per_year(period).unwrap_err();
            assert!(matches!(err, AmortizationError::UnsupportedPeriod { .. }));
            assert!(period.months_between_payments().is_none());
        }
    }

    #[test]
    fn test_months_times_payments_is_a_year() {
        for period in PaymentPeriod::ALL.iter().filter(|p| p.is_supported()) {
            let months = period.months_between_payments().unwrap();
            assert_eq!(months * period.periods_per_year(), 12);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("bi-weekly".parse::<PaymentPeriod>().unwrap(), PaymentPeriod::EveryOtherWeek);
        assert_eq!("every_other_month".parse::<PaymentPeriod>().unwrap(), PaymentPeriod::EveryOtherMonth);
    }
}
