use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten_fields, present, result_object, SCHEDULE_KEY};

/// Format output as tables: a Field/Value summary, then one row per period.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(envelope) => {
            if let Some(result) = result_object(value) {
                print_fields(result);
                if let Some(Value::Array(rows)) = result.get(SCHEDULE_KEY) {
                    println!();
                    print_rows(rows);
                }
                print_notes(envelope);
            } else {
                print_fields(envelope);
            }
        }
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", present("", value)),
    }
}

fn print_fields(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten_fields(map) {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(|v| present(h, v)).unwrap_or_default())
                .collect();
            builder.push_record(cells);
        }
    }

    println!("{}", Table::from(builder));
}

fn print_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
