use serde_json::Value;
use std::io;

use super::{flatten_fields, present, result_object, SCHEDULE_KEY};

/// Write output as CSV to stdout.
///
/// A schedule is written one row per period; any other result becomes a
/// two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match (value, result_object(value)) {
        (_, Some(result)) => match result.get(SCHEDULE_KEY) {
            Some(Value::Array(rows)) => write_rows(&mut wtr, rows),
            _ => write_fields(&mut wtr, result),
        },
        (Value::Array(rows), None) => write_rows(&mut wtr, rows),
        (Value::Object(map), None) => write_fields(&mut wtr, map),
        (other, None) => wtr.write_record([present("", other)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::debug!(error = %e, "csv write failed");
    }
}

fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in flatten_fields(map) {
        wtr.write_record([key, val])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;

    for row in rows {
        if let Value::Object(map) = row {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(|v| present(h, v)).unwrap_or_default())
                .collect();
            wtr.write_record(&cells)?;
        }
    }
    Ok(())
}
