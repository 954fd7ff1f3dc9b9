pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use amortization_core::round_currency;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::OutputFormat;

/// Result key holding the period-by-period rows.
pub const SCHEDULE_KEY: &str = "schedule";

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of a computation envelope, if there is one.
pub fn result_object(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    value.get("result").and_then(Value::as_object)
}

/// Rates keep full precision on display; every other decimal is money.
fn is_rate_key(key: &str) -> bool {
    key.contains("rate")
}

/// Render a single value for human-facing output.
///
/// Decimal strings under money keys are rounded half-up to cents here and
/// nowhere earlier.
pub fn present(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) if !is_rate_key(key) => format!("{:.2}", round_currency(d)),
            Ok(d) => d.normalize().to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| present(key, v))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten one level of nested objects into `parent.child` keys.
pub fn flatten_fields(map: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (child, child_val) in inner {
                    fields.push((format!("{key}.{child}"), present(child, child_val)));
                }
            }
            Value::Array(_) if key == SCHEDULE_KEY => {}
            _ => fields.push((key.clone(), present(key, val))),
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_present_rounds_money_only() {
        assert_eq!(present("balance", &json!("99900.4494748472")), "99900.45");
        assert_eq!(present("interest", &json!("500")), "500.00");
        assert_eq!(present("rate_per_period", &json!("0.0050000")), "0.005");
        assert_eq!(present("date", &json!("2025-03-01")), "2025-03-01");
        assert_eq!(present("period", &json!(12)), "12");
    }

    #[test]
    fn test_flatten_skips_schedule() {
        let map = json!({
            "derived": {"monthly_pi_payment": "599.5505251528"},
            "payments_made": 360,
            "schedule": [{"period": 1}],
        });
        let fields = flatten_fields(map.as_object().unwrap());
        assert_eq!(
            fields,
            vec![
                ("derived.monthly_pi_payment".to_string(), "599.55".to_string()),
                ("payments_made".to_string(), "360".to_string()),
            ]
        );
    }
}
