use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Rates as entered by a borrower (5.0 = 5%). Converted to `Rate` before any math.
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Minor-unit precision for currency amounts.
pub const CURRENCY_DP: u32 = 2;

/// Precision carried by the level payment inside the engine.
pub const INTERNAL_DP: u32 = 10;

/// Round a monetary amount to cents, half-up (midpoint away from zero).
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to the engine's internal precision, half-up.
///
/// Keeps balances and running totals within exact decimal range across long schedules.
pub fn round_internal(amount: Money) -> Money {
    amount.round_dp_with_strategy(INTERNAL_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    pub rounding: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
            rounding: format!("half_up_{CURRENCY_DP}dp"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec!(0.125)), dec!(0.13));
        assert_eq!(round_currency(dec!(0.135)), dec!(0.14));
        assert_eq!(round_currency(dec!(599.5505)), dec!(599.55));
    }

    #[test]
    fn test_round_currency_negative_away_from_zero() {
        assert_eq!(round_currency(dec!(-0.125)), dec!(-0.13));
    }

    #[test]
    fn test_round_internal_keeps_sub_cent_digits() {
        assert_eq!(round_internal(dec!(33.333333333333333)), dec!(33.3333333333));
        assert_eq!(round_internal(dec!(0.00000000005)), dec!(0.0000000001));
    }

    #[test]
    fn test_metadata_envelope() {
        let out = with_metadata("Test", &serde_json::json!({"a": 1}), vec![], 7, dec!(1));
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.metadata.rounding, "half_up_2dp");
        assert_eq!(out.assumptions["a"], 1);
    }
}
