use serde_json::Value;
use std::io;

use super::is_result_rows;

/// Format output as CSV on stdout.
pub fn print_csv(value: &Value) {
    let result = match value {
        Value::Array(arr) if is_result_rows(arr) => write_rows(arr),
        Value::Array(arr) => write_objects(arr),
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(res_map)) => write_key_values(res_map),
            _ => write_key_values(map),
        },
        _ => {
            println!("{}", value);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("CSV error: {}", e);
    }
}

fn write_rows(rows: &[Value]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["label", "value", "is_currency"])?;
    for row in rows {
        let label = row.get("label").and_then(Value::as_str).unwrap_or_default();
        let value = row.get("value").and_then(Value::as_str).unwrap_or_default();
        let currency = row
            .get("is_currency")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        writer.write_record([label, value, &currency.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_objects(arr: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", render(item));
        }
        return Ok(());
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(&headers)?;
    for item in arr {
        if let Value::Object(map) = item {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(render).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_key_values(map: &serde_json::Map<String, Value>) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["field", "value"])?;
    for (key, val) in map {
        writer.write_record([key.as_str(), &render(val)])?;
    }
    writer.flush()?;
    Ok(())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
