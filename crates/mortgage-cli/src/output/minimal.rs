use serde_json::Value;

use super::{format_scalar, result_object};

/// Print just the headline figure.
///
/// A calculation prints its periodic payment; a comparison prints the
/// lowest payment across options.
pub fn print_minimal(value: &Value) {
    match headline(value) {
        Some(text) => println!("{}", text),
        None => println!("{}", format_scalar(value)),
    }
}

fn headline(value: &Value) -> Option<String> {
    let result = result_object(value)?;

    if let Some(val) = result.get("monthly_payment").filter(|v| !v.is_null()) {
        return Some(format_scalar(val));
    }
    if let Some(val) = result
        .get("comparison_summary")
        .and_then(|s| s.get("best_monthly_payment"))
    {
        return Some(format_scalar(val));
    }

    result
        .iter()
        .next()
        .map(|(key, val)| format!("{}: {}", key, format_scalar(val)))
}
