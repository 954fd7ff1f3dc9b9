use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AmortizationError;
use crate::periods::{CompoundingPeriod, DurationType, PaymentPeriod};
use crate::types::{Money, Percent};
use crate::AmortizationResult;

/// Kind of loan. Carried through to output; does not change the math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanType {
    #[default]
    GenericLoan,
    Mortgage,
    Auto,
    Student,
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanType::GenericLoan => write!(f, "Generic Loan"),
            LoanType::Mortgage => write!(f, "Mortgage"),
            LoanType::Auto => write!(f, "Auto"),
            LoanType::Student => write!(f, "Student"),
        }
    }
}

impl FromStr for LoanType {
    type Err = AmortizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::periods::normalise_label(s).as_str() {
            "generic" | "genericloan" | "loan" => Ok(LoanType::GenericLoan),
            "mortgage" => Ok(LoanType::Mortgage),
            "auto" | "car" => Ok(LoanType::Auto),
            "student" => Ok(LoanType::Student),
            _ => Err(AmortizationError::invalid(
                "loan_type",
                format!("unknown loan type '{s}'"),
            )),
        }
    }
}

/// Everything the engine needs to price a fixed-term loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Principal borrowed.
    pub opening_balance: Money,
    /// Nominal annual rate in percent (6.0 = 6%).
    pub interest_rate: Percent,
    /// Term magnitude, read through `duration_type`.
    pub loan_term: Decimal,
    #[serde(default)]
    pub compounding_period: CompoundingPeriod,
    #[serde(default)]
    pub payment_period: PaymentPeriod,
    #[serde(default)]
    pub duration_type: DurationType,
    /// Straight division of the nominal rate instead of compounding conversion.
    #[serde(default)]
    pub is_simple: bool,
    #[serde(default)]
    pub loan_type: LoanType,
    #[serde(default)]
    pub property_taxes: Money,
    #[serde(default)]
    pub hazard_insurance: Money,
    #[serde(default)]
    pub mortgage_insurance: Money,
    /// Extra principal paid with every payment.
    #[serde(default)]
    pub additional_principal: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanParameters {
    /// Plain loan with monthly compounding and payments, term in years, no add-ons.
    pub fn new(opening_balance: Money, interest_rate: Percent, loan_term: Decimal) -> Self {
        LoanParameters {
            opening_balance,
            interest_rate,
            loan_term,
            compounding_period: CompoundingPeriod::default(),
            payment_period: PaymentPeriod::default(),
            duration_type: DurationType::default(),
            is_simple: false,
            loan_type: LoanType::default(),
            property_taxes: Decimal::ZERO,
            hazard_insurance: Decimal::ZERO,
            mortgage_insurance: Decimal::ZERO,
            additional_principal: Decimal::ZERO,
            first_payment_date: None,
        }
    }

    /// Recurring escrow add-ons per payment (taxes and insurance).
    ///
    /// [`validate`](Self::validate) rejects add-ons whose sum overflows.
    pub fn escrow_per_payment(&self) -> Money {
        self.property_taxes + self.hazard_insurance + self.mortgage_insurance
    }

    /// Range checks on the raw inputs. Period support is checked by the converters.
    pub fn validate(&self) -> AmortizationResult<()> {
        if self.opening_balance <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "opening_balance",
                "Opening balance must be positive",
            ));
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "interest_rate",
                "Interest rate cannot be negative",
            ));
        }
        if self.loan_term <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "loan_term",
                "Loan term must be positive",
            ));
        }

        let add_ons = [
            ("property_taxes", self.property_taxes),
            ("hazard_insurance", self.hazard_insurance),
            ("mortgage_insurance", self.mortgage_insurance),
            ("additional_principal", self.additional_principal),
        ];
        for (field, amount) in add_ons {
            if amount < Decimal::ZERO {
                return Err(AmortizationError::invalid(field, "Amount cannot be negative"));
            }
        }

        self.property_taxes
            .checked_add(self.hazard_insurance)
            .and_then(|sum| sum.checked_add(self.mortgage_insurance))
            .ok_or_else(|| AmortizationError::overflow("escrow per payment"))?;

        Ok(())
    }
}
