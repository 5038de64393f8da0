use serde_json::{Map, Value};
use std::io;

use super::format_scalar;

/// Write output as CSV to stdout.
///
/// A result carrying a `rows` ledger is written one line per iteration;
/// any other result becomes two-column field/value CSV.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                if let Some(Value::Array(rows)) = result.get("rows") {
                    write_array_csv(&mut wtr, rows);
                } else {
                    write_fields_csv(&mut wtr, result);
                }
            }
            _ => write_fields_csv(&mut wtr, map),
        },
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_scalar(value, "")]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields_csv<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        match val {
            // Flatten one level so the summary reads as summary.customer_total etc.
            Value::Object(nested) => {
                for (inner_key, inner) in nested {
                    let name = format!("{key}.{inner_key}");
                    let _ = wtr.write_record([name.as_str(), &format_scalar(inner, "")]);
                }
            }
            _ => {
                let _ = wtr.write_record([key.as_str(), &format_scalar(val, "")]);
            }
        }
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(*h)
                            .map(|v| format_scalar(v, ""))
                            .unwrap_or_default()
                    })
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_scalar(item, "")]);
        }
    }
}
