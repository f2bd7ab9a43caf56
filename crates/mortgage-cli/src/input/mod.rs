pub mod file;
pub mod stdin;

use chrono::NaiveDate;
use serde_json::Value;

const FIRST_PAYMENT_DATE: &str = "first_payment_date";

/// Load a JSON request from `--input` or, failing that, from piped stdin.
pub fn load_request(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(file::read_json_value(path)?)),
        None => stdin::read_stdin(),
    }
}

/// Fill a missing `first_payment_date` on a single mortgage object.
pub fn default_first_payment_date(value: &mut Value, today: NaiveDate) {
    if let Value::Object(map) = value {
        map.entry(FIRST_PAYMENT_DATE)
            .or_insert_with(|| Value::String(today.to_string()));
    }
}

/// Fill missing `first_payment_date`s on every option of a comparison request.
pub fn default_comparison_dates(value: &mut Value, today: NaiveDate) {
    if let Some(Value::Array(mortgages)) = value.get_mut("mortgages") {
        for mortgage in mortgages {
            default_first_payment_date(mortgage, today);
        }
    }
}
