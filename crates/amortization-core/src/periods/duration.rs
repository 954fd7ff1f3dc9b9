use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AmortizationError;

/// Unit in which a loan term is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationType {
    #[default]
    Years,
    Months,
    Weeks,
    /// Term is a raw count of payments.
    Payments,
}

impl std::fmt::Display for DurationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationType::Years => write!(f, "Years"),
            DurationType::Months => write!(f, "Months"),
            DurationType::Weeks => write!(f, "Weeks"),
            DurationType::Payments => write!(f, "Payments"),
        }
    }
}

impl FromStr for DurationType {
    type Err = AmortizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match super::normalise_label(s).as_str() {
            "years" | "year" | "y" => Ok(DurationType::Years),
            "months" | "month" | "m" => Ok(DurationType::Months),
            "weeks" | "week" | "w" => Ok(DurationType::Weeks),
            "payments" | "payment" | "p" => Ok(DurationType::Payments),
            _ => Err(AmortizationError::invalid(
                "duration_type",
                format!("unknown duration type '{s}'"),
            )),
        }
    }
}
