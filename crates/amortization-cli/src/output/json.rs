use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print JSON to stdout at full precision.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            let mut out = io::stdout().lock();
            if let Err(e) = writeln!(out, "{s}") {
                tracing::debug!(error = %e, "stdout closed");
            }
        }
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
