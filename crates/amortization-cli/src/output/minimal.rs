use serde_json::Value;

use super::{present, result_object};

/// Key figures in priority order; the first one present is printed.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_pi_payment",
    "rate_per_period",
    "total_paid",
    "total_interest",
    "payments_made",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let Some(map) = result_object(value) else {
        println!("{}", present("", value));
        return;
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            println!("{}", present(key, val));
            return;
        }
    }

    if let Some((key, val)) = map.iter().next() {
        println!("{}: {}", key, present(key, val));
    }
}
