use serde_json::Value;

use super::is_result_rows;

/// Keys that hold the headline answer, in priority order.
const HEADLINE_KEYS: &[&str] = &[
    "monthly_payment",
    "total",
    "tax",
    "interest_saved",
    "lp_distribution",
    "total_interest",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    // Calculator rows: one "label: value" line each, in declared order
    if let Value::Array(arr) = value {
        if is_result_rows(arr) {
            for row in arr {
                let label = row.get("label").and_then(Value::as_str).unwrap_or_default();
                let val = row.get("value").and_then(Value::as_str).unwrap_or_default();
                println!("{}: {}", label, val);
            }
            return;
        }
    }

    // Envelope: look for well-known result fields, then fall back to the
    // first scalar in the result object
    let result = value.get("result").unwrap_or(value);
    if let Value::Object(map) = result {
        for key in HEADLINE_KEYS {
            if let Some(v) = map.get(*key) {
                println!("{}", render(v));
                return;
            }
        }
        if let Some((_, v)) = map.iter().find(|(_, v)| !v.is_array() && !v.is_object()) {
            println!("{}", render(v));
            return;
        }
    }

    println!("{}", render(result));
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
