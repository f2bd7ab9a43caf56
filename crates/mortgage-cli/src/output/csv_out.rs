use serde_json::Value;
use std::io::{self, Write};

use super::{format_scalar, result_object};

/// Write output as CSV to stdout.
///
/// Calculations emit one row per amortization entry; comparisons emit one
/// row per option. Anything else falls back to field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let Some(result) = result_object(value) else {
        return wtr.write_record([format_scalar(value)]);
    };

    if let Some(Value::Array(schedule)) = result.get("amortization_schedule") {
        write_array_csv(wtr, schedule)
    } else if let Some(Value::Array(mortgages)) = result.get("mortgages") {
        write_options_csv(wtr, mortgages)
    } else {
        wtr.write_record(["field", "value"])?;
        for (key, val) in result {
            wtr.write_record([key.as_str(), &format_scalar(val)])?;
        }
        Ok(())
    }
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

fn write_options_csv<W: Write>(wtr: &mut csv::Writer<W>, mortgages: &[Value]) -> csv::Result<()> {
    const FIELDS: [&str; 6] = [
        "calculation_id",
        "monthly_payment",
        "total_interest",
        "total_payments",
        "number_of_payments",
        "total_interest_saved",
    ];

    let mut header = vec!["option"];
    header.extend(FIELDS);
    wtr.write_record(&header)?;
    for (idx, calc) in mortgages.iter().enumerate() {
        let mut row = vec![(idx + 1).to_string()];
        row.extend(
            FIELDS
                .iter()
                .map(|f| calc.get(*f).map(format_scalar).unwrap_or_default()),
        );
        wtr.write_record(&row)?;
    }
    Ok(())
}
