use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AmortizationError;
use crate::AmortizationResult;

/// How often interest is compounded onto the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundingPeriod {
    Daily,
    #[default]
    Monthly,
    SemiAnnually,
    Annually,
}

impl CompoundingPeriod {
    pub const ALL: [CompoundingPeriod; 4] = [
        CompoundingPeriod::Daily,
        CompoundingPeriod::Monthly,
        CompoundingPeriod::SemiAnnually,
        CompoundingPeriod::Annually,
    ];

    /// Nominal compounding events per year, whether or not the engine supports it.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingPeriod::Daily => 365,
            CompoundingPeriod::Monthly => 12,
            CompoundingPeriod::SemiAnnually => 2,
            CompoundingPeriod::Annually => 1,
        }
    }

    /// Only monthly compounding is implemented.
    pub fn is_supported(&self) -> bool {
        match self {
            CompoundingPeriod::Monthly => true,
            CompoundingPeriod::Daily
            | CompoundingPeriod::SemiAnnually
            | CompoundingPeriod::Annually => false,
        }
    }
}

impl std::fmt::Display for CompoundingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompoundingPeriod::Daily => write!(f, "Daily"),
            CompoundingPeriod::Monthly => write!(f, "Monthly"),
            CompoundingPeriod::SemiAnnually => write!(f, "Semi-Annually"),
            CompoundingPeriod::Annually => write!(f, "Annually"),
        }
    }
}

impl FromStr for CompoundingPeriod {
    type Err = AmortizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalise_label(s).as_str() {
            "daily" => Ok(CompoundingPeriod::Daily),
            "monthly" => Ok(CompoundingPeriod::Monthly),
            "semiannually" | "semiannual" => Ok(CompoundingPeriod::SemiAnnually),
            "annually" | "annual" => Ok(CompoundingPeriod::Annually),
            _ => Err(AmortizationError::invalid(
                "compounding_period",
                format!("unknown compounding period '{s}'"),
            )),
        }
    }
}

/// Number of compounding events per year for a supported compounding period.
pub fn compounding_periods_per_year(period: CompoundingPeriod) -> AmortizationResult<Decimal> {
    if !period.is_supported() {
        return Err(AmortizationError::UnsupportedPeriod {
            kind: "compounding".into(),
            period: period.to_string(),
        });
    }
    Ok(Decimal::from(period.periods_per_year()))
}
