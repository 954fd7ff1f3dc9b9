use serde_json::{json, Value};

use amortization_core::periods::{CompoundingPeriod, PaymentPeriod};

pub fn run_periods() -> Result<Value, Box<dyn std::error::Error>> {
    let compounding = CompoundingPeriod::ALL.iter().map(|p| {
        json!({
            "kind": "compounding",
            "period": p.to_string(),
            "per_year": p.periods_per_year(),
            "supported": p.is_supported(),
        })
    });
    let payment = PaymentPeriod::ALL.iter().map(|p| {
        json!({
            "kind": "payment",
            "period": p.to_string(),
            "per_year": p.periods_per_year(),
            "supported": p.is_supported(),
        })
    });

    Ok(Value::Array(compounding.chain(payment).collect()))
}
