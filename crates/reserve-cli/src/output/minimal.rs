use serde_json::Value;

use super::format_scalar;

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, first in the
/// result itself and then in its `summary`, falling back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "customer_total",
        "interest_only",
        "total_interest_and_principal",
        "effective_annual_rate",
    ];

    let summary = result_obj.get("summary");
    for key in &priority_keys {
        for scope in [Some(result_obj), summary].into_iter().flatten() {
            if let Some(val) = scope.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val, "null"));
                    return;
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val, "null"));
            return;
        }
    }

    println!("{}", format_scalar(result_obj, "null"));
}
