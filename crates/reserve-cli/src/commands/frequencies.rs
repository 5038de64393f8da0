use serde_json::{json, Value};

use reserve_core::CompoundingFrequency;

pub fn run_frequencies() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = CompoundingFrequency::ALL
        .iter()
        .enumerate()
        .map(|(index, f)| {
            json!({
                "index": index,
                "frequency": f.name(),
                "periods_per_year": f.periods_per_year().to_string(),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}
