pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Whether a JSON array looks like calculator result rows
/// (objects with label/value fields).
pub(crate) fn is_result_rows(arr: &[Value]) -> bool {
    !arr.is_empty()
        && arr.iter().all(|item| {
            item.get("label").is_some_and(Value::is_string)
                && item.get("value").is_some_and(Value::is_string)
        })
}
